use fs::{FileStore, MAX_FILENAME_LEN, MAX_FILE_SIZE};
use log::LevelFilter;
use rand::{distributions::Alphanumeric, Rng};

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Debug)
        .try_init();
}

pub fn store() -> FileStore {
    init_test_logger();
    FileStore::new()
}

/// A random valid file name.
pub fn random_name() -> String {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(1..MAX_FILENAME_LEN);
    (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random content that fits in one file.
pub fn random_data() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(0..=MAX_FILE_SIZE);
    (0..len).map(|_| rng.gen()).collect()
}
