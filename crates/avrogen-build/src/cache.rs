use std::{
    fs, io,
    path::{Path, PathBuf},
};
use xxhash_rust::xxh3::Xxh3;

///
/// InputHash
///
/// xxh3 over the generator version, the config and every table, in order.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InputHash(pub u64);

impl InputHash {
    #[must_use]
    pub fn compute<'a>(config: &str, tables: impl IntoIterator<Item = &'a str>) -> Self {
        let mut hasher = Xxh3::new();

        hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
        hasher.update(&[0]);
        hasher.update(config.as_bytes());

        for table in tables {
            hasher.update(&[0]);
            hasher.update(table.as_bytes());
        }

        Self(hasher.digest())
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

/// Hash file written next to the generated output.
#[must_use]
pub fn stamp_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".xxh3");

    PathBuf::from(name)
}

/// Whether `output` exists and was produced from inputs hashing to `hash`.
#[must_use]
pub fn is_fresh(output: &Path, hash: InputHash) -> bool {
    output.exists()
        && fs::read_to_string(stamp_path(output)).is_ok_and(|s| s.trim() == hash.to_hex())
}

pub fn store(output: &Path, hash: InputHash) -> io::Result<()> {
    fs::write(stamp_path(output), hash.to_hex())
}

///
/// TESTS
///
