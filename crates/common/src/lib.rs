//! Pieces shared by the server crate and the binary: tracing setup and
//! small wire types that do not belong to any entity.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }
}
