#![no_main]

use libfuzzer_sys::fuzz_target;
use sabir::Model;

const MODEL: &str = "@ sabir 1\n> 3 6 8\nde\nen\nfr\n3\n0\n7\n1\n9\n2\n4\n6\n";

fuzz_target!(|data: &[u8]| {
    let mut model = Model::from_reader(MODEL.as_bytes()).unwrap();
    let whole = model.detect(data).clone();
    let scores = model.scores().to_vec();
    assert!(model.labels().contains(&whole));

    // The first byte picks the chunk size.
    let step = data.first().map_or(1, |b| 1 + (*b as usize % 7));
    model.init();
    for chunk in data.chunks(step) {
        model.feed(chunk);
    }
    assert_eq!(model.finish(), &whole);
    assert_eq!(model.scores(), &scores[..]);
});
