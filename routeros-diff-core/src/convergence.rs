use log::warn;

use crate::diff::diff;
use crate::error::{ConvergenceError, Error};
use crate::tree::SectionTree;

/// Fail with the residual script when `actual` has not reached `expected`.
///
/// Only sections present in `expected` are compared.
pub fn check_convergence(actual: &SectionTree, expected: &SectionTree) -> Result<(), Error> {
    let residual = diff(actual, expected)?;
    if residual.is_empty() {
        return Ok(());
    }
    warn!(
        "configuration did not converge, {} command(s) outstanding",
        residual.len()
    );
    Err(ConvergenceError { residual }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::apply;
    use crate::parser::parse;

    #[test]
    fn converged_trees_pass() {
        let tree = parse("/ip address\nadd address=10.0.0.1/24\n").expect("parse");
        assert!(check_convergence(&tree, &tree.clone()).is_ok());
    }

    #[test]
    fn content_only_in_actual_does_not_block_convergence() {
        let base = parse(
            "/ip address\nadd address=10.0.0.1/24\n/ip dns\nset cache-size=2048 servers=1.1.1.1\n",
        )
        .expect("parse");
        let target = parse("/ip dns\nset servers=9.9.9.9\n").expect("parse");

        let result = apply(&base, &diff(&base, &target).expect("diff")).expect("apply");
        assert!(check_convergence(&result, &target).is_ok());
        // Structural equality still sees the untouched address and cache size.
        assert_ne!(result, target);
    }

    #[test]
    fn residual_is_attached() {
        let actual = parse("/ip address\nadd address=10.0.0.1/24\n").expect("parse");
        let expected = parse("/ip address\nadd address=10.0.0.2/24\n").expect("parse");
        match check_convergence(&actual, &expected) {
            Err(Error::Convergence(err)) => {
                assert_eq!(err.residual.len(), 2);
                assert_eq!(
                    err.to_string(),
                    "configuration did not converge: 2 residual command(s)"
                );
            }
            other => panic!("expected convergence error, got {other:?}"),
        }
    }
}
