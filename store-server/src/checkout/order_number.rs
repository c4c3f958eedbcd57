//! Order number generation
//!
//! Human-readable identifier distinct from the record id, shown to
//! customers: `ORD-YYYYMMDD-XXXXXX`. The random suffix alone does not
//! guarantee uniqueness; the unique index on `order.orderNumber` does,
//! with the orchestrator retrying once on collision.

use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 6;
const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Generate a date-prefixed order number with a random suffix
pub fn generate() -> String {
    let date = Utc::now().format("%Y%m%d");
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("ORD-{date}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let number = generate();
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(
            parts[2]
                .bytes()
                .all(|b| SUFFIX_CHARSET.contains(&b))
        );
    }

    #[test]
    fn test_date_prefix_is_today() {
        let number = generate();
        let today = Utc::now().format("%Y%m%d").to_string();
        assert!(number.starts_with(&format!("ORD-{today}-")));
    }
}
