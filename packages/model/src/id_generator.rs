use crc32fast::Hasher;
use uuid::Uuid;

/// Short seed derived from an arbitrary session nonce using CRC32
pub fn session_seed(nonce: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(nonce.as_bytes());
    format!("{:08x}", hasher.finalize())
}

/// Sequential id generator for cards and elements within one editing session
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Session id (CRC32 of a random nonce)
    count: u64,   // Sequential counter
}

impl IdGenerator {
    /// Generator with a random seed, distinct from every other session's
    pub fn for_session() -> Self {
        Self::from_seed(session_seed(&Uuid::new_v4().to_string()))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_seed_is_stable() {
        assert_eq!(session_seed("abc"), session_seed("abc"));
        assert_ne!(session_seed("abc"), session_seed("abd"));
        assert_eq!(session_seed("abc").len(), 8);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("s");

        assert_eq!(gen.new_id(), "s-1");
        assert_eq!(gen.new_id(), "s-2");
        assert_eq!(gen.seed(), "s");
    }

    #[test]
    fn test_sessions_get_distinct_seeds() {
        let a = IdGenerator::for_session();
        let b = IdGenerator::for_session();
        assert_ne!(a.seed(), b.seed());
    }
}
