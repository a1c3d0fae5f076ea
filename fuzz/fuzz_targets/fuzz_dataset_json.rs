#![no_main]

use libfuzzer_sys::fuzz_target;
use recblend::recommend::{Dataset, HybridRecommender};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a dataset file: parse errors are fine, panics are not.
    let Ok(dataset) = serde_json::from_slice::<Dataset>(data) else {
        return;
    };
    let recommender = HybridRecommender::default();
    for user in dataset.users.iter().take(4) {
        let _ = recommender.recommend(&user.id, &dataset.users, &dataset.items, &dataset.ratings);
    }
});
