pub mod comment;
pub mod device;
pub mod network;
pub mod rating;
pub mod stats;
pub mod user;

pub use comment::Comment;
pub use device::Device;
pub use network::Network;
pub use rating::Rating;
pub use user::Claims;

/// Lowercased, hyphen-separated form of a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c != '\'' {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("MTN Nigeria"), "mtn-nigeria");
        assert_eq!(slugify("  Airtel -- 4G  "), "airtel-4g");
        assert_eq!(slugify("Glo's Network"), "glos-network");
        assert_eq!(slugify("!!!"), "");
    }
}
