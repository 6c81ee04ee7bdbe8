use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Creates a random alphanumeric string of the given length.
///
/// Used for document keys assigned by the store, in the same shape
/// hosted document databases hand out (`20` chars is the usual length).
pub fn create_random_id(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
