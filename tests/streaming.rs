use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sabir::{Config, Label, Model};

/// Build a model with the labels 'labels' and 'num_features' pseudo random
/// counts.
fn make_model(labels: &[&str], num_features: usize) -> Model {
    let labels_len: usize = labels.iter().map(|l| l.len()).sum();
    let mut text = format!(
        "@ sabir 1\n> {} {} {}\n",
        labels.len(),
        labels_len,
        num_features
    );
    for l in labels {
        text.push_str(l);
        text.push('\n');
    }
    let mut v: u64 = 7;
    for i in 0..num_features {
        v = v.wrapping_mul(6364136223846793005).wrapping_add(i as u64);
        text.push_str(&((v >> 33) % 1000).to_string());
        text.push('\n');
    }
    Model::from_reader(text.as_bytes()).unwrap()
}

fn default_model() -> Model {
    make_model(&["de", "en", "es", "fr", "ja", "ru"], 1 << 12)
}

const SAMPLES: &[&str] = &[
    "The quick brown fox jumps over the lazy dog.",
    "Le cœur a ses raisons que la raison ne connaît point.",
    "Съешь же ещё этих мягких французских булок, да выпей чаю.",
    "日本語のテキストを分類します。",
    "mixed 😀 emoji 🎉 and 𐐷𐐸𐐹 deseret, 123 numbers!!",
    "ab",
    "",
];

/// Classify 'chunks' in one session, and return the label and the scores.
fn run_chunks(model: &mut Model, chunks: &[&[u8]]) -> (Label, Vec<f64>) {
    model.init();
    for chunk in chunks {
        model.feed(chunk);
    }
    let label = model.finish().clone();
    (label, model.scores().to_vec())
}

fn run_whole(model: &mut Model, text: &[u8]) -> (Label, Vec<f64>) {
    let label = model.detect(text).clone();
    (label, model.scores().to_vec())
}

#[test]
fn test_deterministic() {
    let mut model = default_model();
    for text in SAMPLES {
        let first = run_whole(&mut model, text.as_bytes());
        for _ in 0..3 {
            assert_eq!(run_whole(&mut model, text.as_bytes()), first);
        }
        // A fresh model gives the same answer.
        let mut other = default_model();
        assert_eq!(run_whole(&mut other, text.as_bytes()), first);
    }
}

#[test]
fn test_every_single_split() {
    let mut model = default_model();
    for text in SAMPLES {
        let text = text.as_bytes();
        let whole = run_whole(&mut model, text);
        for i in 0..=text.len() {
            let (a, b) = text.split_at(i);
            let split = run_chunks(&mut model, &[a, b]);
            assert_eq!(split, whole, "split at {}", i);
        }
    }
}

#[test]
fn test_every_double_split() {
    let mut model = default_model();
    let text = "Ωmega 😀x ß日".as_bytes();
    let whole = run_whole(&mut model, text);
    for i in 0..=text.len() {
        for j in i..=text.len() {
            let chunks = [&text[..i], &text[i..j], &text[j..]];
            assert_eq!(run_chunks(&mut model, &chunks), whole);
        }
    }
}

#[test]
fn test_byte_at_a_time() {
    let mut model = default_model();
    for text in SAMPLES {
        let text = text.as_bytes();
        let whole = run_whole(&mut model, text);
        let chunks: Vec<&[u8]> = text.chunks(1).collect();
        assert_eq!(run_chunks(&mut model, &chunks), whole);
    }
}

#[test]
fn test_split_inside_four_byte_sequences() {
    let mut model = default_model();
    // An emoji (a symbol) and a four byte letter, between letters.
    for text in ["abc😀def", "abc𐐷def"] {
        let text = text.as_bytes();
        let whole = run_whole(&mut model, text);
        let start = 3;
        for cut in 1..4 {
            let at = start + cut;
            let chunks = [&text[..at], &text[at..]];
            assert_eq!(run_chunks(&mut model, &chunks), whole);
        }
        // Every byte of the sequence in its own chunk, with empty chunks.
        let chunks: [&[u8]; 7] = [
            &text[..4],
            &[],
            &text[4..5],
            &text[5..6],
            &[],
            &text[6..7],
            &text[7..],
        ];
        assert_eq!(run_chunks(&mut model, &chunks), whole);
    }
}

#[test]
fn test_split_at_window_fill() {
    let mut model = default_model();
    // The window holds PAD plus three bytes when it first fills.
    let text = "abcdefg hé".as_bytes();
    let whole = run_whole(&mut model, text);
    for at in [2, 3, 4, 5] {
        let chunks = [&text[..at], &text[at..]];
        assert_eq!(run_chunks(&mut model, &chunks), whole);
    }
}

#[test]
fn test_random_chunking() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut model = default_model();
    let text: String = SAMPLES.concat();
    let text = text.as_bytes();
    let whole = run_whole(&mut model, text);

    for _ in 0..200 {
        let mut chunks = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            let len = rng.gen_range(0..=7).min(text.len() - pos);
            chunks.push(&text[pos..pos + len]);
            pos += len;
        }
        assert_eq!(run_chunks(&mut model, &chunks), whole);
    }
}

#[test]
fn test_malformed_input() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut model = default_model();

    for _ in 0..200 {
        let len = rng.gen_range(0..256);
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let whole = run_whole(&mut model, &data);
        assert!(model.labels().contains(&whole.0));

        // Malformed input is split like any other.
        let at = rng.gen_range(0..=data.len());
        let chunks = [&data[..at], &data[at..]];
        assert_eq!(run_chunks(&mut model, &chunks), whole);
    }

    // Bytes that can never appear in UTF-8, truncated sequences and stray
    // continuation bytes.
    for data in [
        &[0xff, 0xfe, 0xc0, 0x80][..],
        &[0xf0, 0x9f, 0x98],
        &[0x80, 0x80, b'a', b'b', b'c', b'd'],
        &[0xed, 0xa0, 0x80, b'x'],
    ] {
        let whole = run_whole(&mut model, data);
        assert!(model.labels().contains(&whole.0));
        let chunks: Vec<&[u8]> = data.chunks(1).collect();
        assert_eq!(run_chunks(&mut model, &chunks), whole);
    }
}

#[test]
fn test_malformed_bytes_do_not_contribute() {
    let mut model = default_model();
    let clean = run_whole(&mut model, b"abcdef");
    let noisy = [b'a', b'b', 0x80, b'c', 0xff, b'd', b'e', b'f'];
    let noisy = run_whole(&mut model, &noisy);
    assert_eq!(clean, noisy);
}

#[test]
fn test_finish_is_idempotent() {
    let mut model = default_model();
    for text in SAMPLES {
        model.init();
        model.feed(text.as_bytes());
        let first = model.finish().clone();
        let scores = model.scores().to_vec();
        let second = model.finish().clone();
        assert_eq!(first, second);
        assert_eq!(model.scores(), &scores[..]);
    }
}

#[test]
fn test_empty_input() {
    let mut model = default_model();
    model.init();
    assert_eq!(model.finish(), "de");
    assert!(model.scores().iter().all(|s| *s == 0.));
    assert_eq!(model.detect(b""), "de");

    // Text without letters never fills the window.
    assert_eq!(model.detect(b"1 2 3 !!! ..."), "de");
    assert!(model.scores().iter().all(|s| *s == 0.));
}

#[test]
fn test_init_starts_over() {
    let mut model = default_model();
    let expected = run_whole(&mut model, b"hello world");

    model.init();
    model.feed(b"something else entirely");
    // Leave a sequence unfinished.
    model.feed(&[0xe6, 0x97]);
    assert_eq!(run_chunks(&mut model, &[b"hello", b" world"]), expected);
}

#[test]
fn test_the_cat() {
    let text = "@ sabir 1\n> 2 4 2\nen\nfr\n1\n3\n";
    let mut model = Model::from_reader(text.as_bytes()).unwrap();
    let expected = model.detect(b"the cat").clone();
    for _ in 0..5 {
        assert_eq!(model.detect(b"the cat"), &expected);
    }
    let text = b"the cat";
    for i in 0..=text.len() {
        let (label, _) = run_chunks(&mut model, &[&text[..i], &text[i..]]);
        assert_eq!(label, expected);
    }
}

#[test]
fn test_verbose_is_observational() {
    // Make sure the diagnostic lines are actually formatted.
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let mut quiet = default_model();
    let mut loud = default_model();
    loud.set_config(Config::new(true));
    assert!(loud.config().verbose());
    assert!(!quiet.config().verbose());

    for text in ["Der Hund läuft 😀 über", SAMPLES[0], SAMPLES[4]] {
        let expected = run_whole(&mut quiet, text.as_bytes());
        assert_eq!(run_whole(&mut loud, text.as_bytes()), expected);
        let chunks: Vec<&[u8]> = text.as_bytes().chunks(3).collect();
        assert_eq!(run_chunks(&mut loud, &chunks), expected);
    }

    loud.set_config(Config::default());
    assert!(!loud.config().verbose());
    let text = SAMPLES[1].as_bytes();
    assert_eq!(run_whole(&mut loud, text), run_whole(&mut quiet, text));
}
