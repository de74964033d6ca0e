//! Generated strings must match the pattern they were generated from.

use maker_core::RegexPattern;
use maker_derive::Record;
use maker_generator::generators::regex::generate;
use maker_generator::Maker;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PATTERNS: &[(&str, &str)] = &[
    ("alphanumerics", r"^[a-zA-Z0-9]*$"),
    ("5 dots", r"\.{5}"),
    ("any char", r".{15}"),
    ("repeater", r"^([A-Z]\.[a-z])*$"),
    ("char class length", r"[-a-zA-Z0-9@:%._\+~#=]{2,2}"),
    (
        "emails",
        r"^([a-zA-Z0-9._%-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6})*$",
    ),
    ("time", r"^(0?[1-9]|1[0-2]):[0-5][0-9]"),
    (
        "url",
        r"https?:\/\/(www\.)?[-a-zA-Z0-9@:%._\+~#=]{2,256}\.[a-z]{2,6}([-a-zA-Z0-9@:%_\+.~#?&\/\/=])",
    ),
    ("open repeat", r"^x{3,}$"),
    ("alternation", r"^(red|green|blue)-[0-9]{2}$"),
    ("digits", r"^\d+$"),
    ("word", r"\w{6}"),
    ("space", r"a\sb"),
    ("perl classes in a set", r"^[\d\s_]{4}$"),
];

#[test]
fn test_generated_strings_match() {
    for (name, source) in PATTERNS {
        let pattern = RegexPattern::parse(source).unwrap();
        let matcher = regex::Regex::new(source).unwrap();
        let ascii_matcher = regex::bytes::RegexBuilder::new(source)
            .unicode(false)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(12345);

        for _ in 0..25 {
            let generated = generate(&mut rng, pattern.root()).unwrap();
            assert!(generated.is_ascii(), "{name}: `{generated}` is not ASCII");
            assert!(
                matcher.is_match(&generated),
                "{name}: `{generated}` does not match {source}"
            );
            assert!(
                ascii_matcher.is_match(generated.as_bytes()),
                "{name}: `{generated}` does not match {source} in ASCII mode"
            );
        }
    }
}

#[test]
fn test_time_shaped_field() {
    #[derive(Record, Default)]
    struct Meeting {
        #[maker("regex[^(0?[1-9]|1[0-2]):[0-5][0-9]$]")]
        starts_at: String,
        #[maker("regex[[a-z]{3,8}@example\\.com]")]
        organizer: String,
    }

    let time = regex::Regex::new(r"^(0?[1-9]|1[0-2]):[0-5][0-9]$").unwrap();
    let email = regex::Regex::new(r"^[a-z]{3,8}@example\.com$").unwrap();

    for seed in 0..20 {
        let mut meeting = Meeting::default();
        Maker::with_seed(seed).fill(&mut meeting).unwrap();

        assert!(time.is_match(&meeting.starts_at), "{}", meeting.starts_at);
        assert!(email.is_match(&meeting.organizer), "{}", meeting.organizer);
    }
}

#[test]
fn test_digit_class_fills_integer_field() {
    #[derive(Record, Default)]
    struct Pin {
        #[maker("regex[\\d{4}]")]
        number: i64,
        #[maker("regex[^\\d+$]")]
        digits: String,
    }

    for seed in 0..20 {
        let mut pin = Pin::default();
        Maker::with_seed(seed).fill(&mut pin).unwrap();

        assert!((0..10000).contains(&pin.number), "{}", pin.number);
        assert!(!pin.digits.is_empty());
        assert!(pin.digits.chars().all(|c| c.is_ascii_digit()), "{}", pin.digits);
    }
}

#[test]
fn test_unbounded_quantifiers_are_capped() {
    let pattern = RegexPattern::parse("a*b+").unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let generated = generate(&mut rng, pattern.root()).unwrap();
        let a = generated.chars().filter(|&c| c == 'a').count();
        let b = generated.chars().filter(|&c| c == 'b').count();
        assert!(a <= 10);
        assert!((1..=10).contains(&b));
    }
}
