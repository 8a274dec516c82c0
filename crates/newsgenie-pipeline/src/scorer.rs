//! Lexicon sentiment scorer for news text.

use newsgenie_core::{Article, Sentiment, SentimentLabel};

/// Word weights: `(word, polarity, subjectivity)`.
///
/// Polarity in `[-1.0, 1.0]`, subjectivity in `[0.0, 1.0]`. Keys are
/// lowercase single words.
pub(crate) const LEXICON: &[(&str, f32, f32)] = &[
    // Positive signals
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("positive", 0.23, 0.54),
    ("success", 0.3, 0.3),
    ("successful", 0.75, 0.95),
    ("win", 0.8, 0.4),
    ("wins", 0.8, 0.4),
    ("won", 0.8, 0.4),
    ("victory", 0.6, 0.5),
    ("record", 0.2, 0.3),
    ("boost", 0.4, 0.4),
    ("growth", 0.3, 0.3),
    ("gains", 0.3, 0.3),
    ("surge", 0.4, 0.4),
    ("rally", 0.3, 0.4),
    ("recovery", 0.4, 0.4),
    ("breakthrough", 0.6, 0.5),
    ("hope", 0.5, 0.6),
    ("hopeful", 0.6, 0.8),
    ("happy", 0.8, 1.0),
    ("celebrate", 0.6, 0.6),
    ("love", 0.5, 0.6),
    ("safe", 0.5, 0.5),
    ("strong", 0.43, 0.73),
    ("peace", 0.5, 0.4),
    ("award", 0.4, 0.3),
    ("praised", 0.5, 0.6),
    ("improve", 0.4, 0.4),
    ("improved", 0.4, 0.4),
    ("innovative", 0.5, 0.7),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    // Negative signals
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("crisis", -0.6, 0.5),
    ("war", -0.6, 0.4),
    ("attack", -0.6, 0.4),
    ("killed", -0.8, 0.4),
    ("dead", -0.6, 0.4),
    ("death", -0.6, 0.4),
    ("deaths", -0.6, 0.4),
    ("crash", -0.6, 0.4),
    ("fear", -0.5, 0.6),
    ("fears", -0.5, 0.6),
    ("warning", -0.4, 0.4),
    ("threat", -0.5, 0.5),
    ("loss", -0.4, 0.3),
    ("losses", -0.4, 0.3),
    ("fall", -0.3, 0.3),
    ("falls", -0.3, 0.3),
    ("decline", -0.3, 0.3),
    ("slump", -0.5, 0.4),
    ("failed", -0.5, 0.3),
    ("failure", -0.5, 0.4),
    ("scandal", -0.6, 0.6),
    ("lawsuit", -0.4, 0.3),
    ("ban", -0.4, 0.3),
    ("banned", -0.4, 0.3),
    ("violence", -0.7, 0.5),
    ("disaster", -0.8, 0.6),
    ("outrage", -0.7, 0.8),
    ("angry", -0.5, 1.0),
    ("sad", -0.5, 1.0),
    ("problem", -0.3, 0.4),
    ("concern", -0.3, 0.5),
    ("concerns", -0.3, 0.5),
    ("dangerous", -0.6, 0.6),
];

/// Words that flip the polarity of the next one or two words.
const NEGATORS: &[&str] = &["not", "no", "never", "nor", "without", "cannot", "hardly"];

/// Words that amplify the next word.
const INTENSIFIERS: &[&str] = &[
    "very",
    "extremely",
    "really",
    "highly",
    "deeply",
    "hugely",
    "incredibly",
];

const INTENSIFIER_FACTOR: f32 = 1.3;
const NEGATION_FACTOR: f32 = -0.5;
/// How many preceding tokens a negator reaches across.
const NEGATION_WINDOW: usize = 2;

/// Score an article's title and summary.
#[must_use]
pub fn analyze(article: &Article) -> Sentiment {
    analyze_text(&article.text())
}

/// Score free text with the lexicon.
///
/// Polarity is the mean polarity of matched words (after negation and
/// intensifier adjustments); subjectivity is their mean subjectivity. Both
/// are clamped and rounded to three decimals. Text with no lexicon hits is
/// [`Sentiment::NEUTRAL`].
#[must_use]
pub fn analyze_text(text: &str) -> Sentiment {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|word| {
            word.replace('\u{2019}', "'")
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    let mut polarity_sum = 0.0_f32;
    let mut subjectivity_sum = 0.0_f32;
    let mut hits = 0_u16;

    for (i, token) in tokens.iter().enumerate() {
        let Some(&(_, polarity, subjectivity)) =
            LEXICON.iter().find(|(word, _, _)| *word == token.as_str())
        else {
            continue;
        };

        let mut polarity = polarity;
        if i > 0 && INTENSIFIERS.contains(&tokens[i - 1].as_str()) {
            polarity *= INTENSIFIER_FACTOR;
        }
        let window_start = i.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..i].iter().any(|t| is_negator(t)) {
            polarity *= NEGATION_FACTOR;
        }

        polarity_sum += polarity.clamp(-1.0, 1.0);
        subjectivity_sum += subjectivity;
        hits = hits.saturating_add(1);
    }

    if hits == 0 {
        return Sentiment::NEUTRAL;
    }

    let n = f32::from(hits);
    Sentiment::new(round3(polarity_sum / n), round3(subjectivity_sum / n))
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Label counts across a set of articles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    #[must_use]
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }
}

/// Count sentiment labels; unanalyzed articles count as neutral.
pub fn sentiment_distribution<'a, I>(articles: I) -> SentimentDistribution
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut dist = SentimentDistribution::default();
    for article in articles {
        match article.sentiment().label {
            SentimentLabel::Positive => dist.positive += 1,
            SentimentLabel::Negative => dist.negative += 1,
            SentimentLabel::Neutral => dist.neutral += 1,
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_neutral() {
        assert_eq!(analyze_text(""), Sentiment::NEUTRAL);
    }

    #[test]
    fn whitespace_only_is_neutral() {
        assert_eq!(analyze_text("   \n\t"), Sentiment::NEUTRAL);
    }

    #[test]
    fn unknown_text_is_neutral() {
        assert_eq!(analyze_text("the quick brown fox"), Sentiment::NEUTRAL);
    }

    #[test]
    fn positive_keyword_returns_positive() {
        let s = analyze_text("Team celebrate a great victory");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert!(s.polarity > 0.1, "expected positive polarity, got {}", s.polarity);
        assert!(s.subjectivity > 0.0);
    }

    #[test]
    fn negative_keyword_returns_negative() {
        let s = analyze_text("Disaster as crash leaves many dead");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert!(s.polarity < -0.1, "expected negative polarity, got {}", s.polarity);
    }

    #[test]
    fn negation_flips_polarity() {
        let plain = analyze_text("a good result");
        let negated = analyze_text("not a good result");
        assert!(plain.polarity > 0.0);
        assert!(negated.polarity < 0.0, "got {}", negated.polarity);
    }

    #[test]
    fn contraction_negates() {
        let s = analyze_text("it wasn't good");
        assert!(s.polarity < 0.0, "got {}", s.polarity);
    }

    #[test]
    fn intensifier_amplifies() {
        let plain = analyze_text("good");
        let strong = analyze_text("very good");
        assert!(strong.polarity > plain.polarity);
    }

    #[test]
    fn scores_stay_in_range() {
        let s = analyze_text("extremely excellent extremely wonderful extremely best");
        assert!((-1.0..=1.0).contains(&s.polarity));
        assert!((0.0..=1.0).contains(&s.subjectivity));
        assert_eq!(s.polarity, 1.0);
    }

    #[test]
    fn punctuation_stripped_from_words() {
        let s = analyze_text("\"Great!\"");
        assert_eq!(s.label, SentimentLabel::Positive);
    }

    #[test]
    fn polarity_is_rounded_to_three_decimals() {
        let s = analyze_text("good bad strong");
        let scaled = s.polarity * 1000.0;
        assert!((scaled - scaled.round()).abs() < 1e-3);
    }

    #[test]
    fn distribution_counts_labels() {
        let mut pos = Article::new("u1", "A", "S");
        pos.assign_sentiment(Sentiment::new(0.5, 0.5));
        let mut neg = Article::new("u2", "B", "S");
        neg.assign_sentiment(Sentiment::new(-0.5, 0.5));
        let unscored = Article::new("u3", "C", "S");

        let dist = sentiment_distribution(&[pos, neg, unscored]);
        assert_eq!(dist.positive, 1);
        assert_eq!(dist.negative, 1);
        assert_eq!(dist.neutral, 1);
        assert_eq!(dist.total(), 3);
    }
}
