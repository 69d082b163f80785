use std::collections::HashMap;

/// Answers whether a username/password pair may log in.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Fixed allow-list loaded at startup.
///
/// Passwords are held and compared in plaintext with ordinary string
/// equality. Known limitation: swap in a hashing verifier before exposing
/// this to untrusted networks.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StaticCredentials {
        StaticCredentials::new(HashMap::from([
            ("sallen".to_string(), "Bigmac100".to_string()),
            ("bgaines".to_string(), "Cheese100".to_string()),
        ]))
    }

    #[test]
    fn exact_pair_verifies() {
        let creds = table();
        assert!(creds.verify("sallen", "Bigmac100"));
        assert!(creds.verify("bgaines", "Cheese100"));
    }

    #[test]
    fn anything_else_is_rejected() {
        let creds = table();
        assert!(!creds.verify("sallen", "Cheese100"));
        assert!(!creds.verify("sallen", "bigmac100"));
        assert!(!creds.verify("sallen", "Bigmac100 "));
        assert!(!creds.verify("SALLEN", "Bigmac100"));
        assert!(!creds.verify("nobody", "Bigmac100"));
        assert!(!creds.verify("", ""));
    }
}
