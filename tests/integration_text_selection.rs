use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use typetest::session::{Difficulty, SessionConfig, TextCategory};
use typetest::text::{select_text, TextCatalog};

#[test]
fn code_hard_draws_cover_the_whole_bucket() {
    let catalog = TextCatalog::builtin();
    let bucket = catalog.bucket(TextCategory::Code, Difficulty::Hard);
    assert!(!bucket.is_empty());

    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let text = catalog.select_with(TextCategory::Code, Difficulty::Hard, &mut rng);
        assert!(!text.is_empty());
        assert!(bucket.iter().any(|t| t == text));
        seen.insert(text.to_string());
    }

    assert_eq!(seen.len(), bucket.len());
}

#[test]
fn sentence_draws_are_roughly_uniform() {
    let catalog = TextCatalog::builtin();
    let bucket = catalog.bucket(TextCategory::Sentences, Difficulty::Medium);

    let mut rng = StdRng::seed_from_u64(9);
    let draws = 5_000;
    let mut counts = vec![0usize; bucket.len()];
    for _ in 0..draws {
        let text = catalog.select_with(TextCategory::Sentences, Difficulty::Medium, &mut rng);
        let idx = bucket.iter().position(|t| t == text).unwrap();
        counts[idx] += 1;
    }

    let expected = draws / bucket.len();
    for count in counts {
        assert!(count > expected / 2, "bucket member drawn {count} times");
    }
}

#[test]
fn select_text_never_returns_empty() {
    for category in [TextCategory::Sentences, TextCategory::Paragraphs, TextCategory::Code] {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let config = SessionConfig::new(60, category, difficulty).unwrap();
            for _ in 0..20 {
                assert!(!select_text(&config).is_empty());
            }
        }
    }
}
