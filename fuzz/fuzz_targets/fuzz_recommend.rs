#![no_main]

use libfuzzer_sys::fuzz_target;
use recblend::recommend::{HybridRecommender, Item, Rating, User};

fuzz_target!(|data: &[u8]| {
    // Layout: [n_users, n_items, top_n, (user, item, value)*]
    if data.len() < 3 {
        return;
    }
    let n_users = usize::from(data[0] % 8) + 1;
    let n_items = usize::from(data[1] % 12);
    let top_n = usize::from(data[2] % 16) + 1;

    let users: Vec<User> = (0..n_users).map(|u| User::new(format!("u{u}"))).collect();
    let items: Vec<Item> = (0..n_items)
        .map(|i| Item::new(format!("i{i}"), format!("Item {i}")))
        .collect();
    let ratings: Vec<Rating> = data[3..]
        .chunks_exact(3)
        .filter_map(|c| {
            // Out-of-range values and unknown ids must be rejected or dropped, never panic.
            Rating::new(
                format!("u{}", c[0] % 10),
                format!("i{}", c[1] % 14),
                c[2] % 7,
            )
            .ok()
        })
        .collect();

    let recommender = HybridRecommender::default();
    let Ok(recs) = recommender.recommend_top_n("u0", &users, &items, &ratings, top_n) else {
        return;
    };

    assert!(recs.len() <= top_n);
    assert!(recs.iter().all(|r| r.score.is_finite()));
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
});
