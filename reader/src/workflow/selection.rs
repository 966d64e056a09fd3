use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks the users to scan.
///
/// An explicit request wins over the dataset listing. A limit keeps either
/// the first `limit` users or, when randomized, a seeded sample of them;
/// the result is always sorted.
pub fn select_users(
    available: Vec<String>,
    requested: &[String],
    limit: Option<usize>,
    randomize: bool,
    seed: u64,
) -> Vec<String> {
    let mut users = if requested.is_empty() {
        available
    } else {
        requested.to_vec()
    };

    if let Some(limit) = limit {
        if randomize && limit < users.len() {
            let mut rng = StdRng::seed_from_u64(seed);
            users = users
                .choose_multiple(&mut rng, limit)
                .cloned()
                .collect::<Vec<_>>();
        } else {
            users.truncate(limit);
        }
    }
    users.sort();
    users
}
