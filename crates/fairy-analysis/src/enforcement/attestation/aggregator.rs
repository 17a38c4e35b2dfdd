//! AttestationAggregator — findings in, verified verdict out.

use fairy_core::errors::AttestationError;

use super::types::{Attestation, RunMetadata};
use crate::enforcement::rulepack::RulepackIdentity;
use crate::enforcement::rules::{Finding, FindingSeverity};

const UNKNOWN_RULEPACK: &str = "UNKNOWN_RULEPACK";
const UNKNOWN_VERSION: &str = "0.0.0";

pub struct AttestationAggregator;

impl AttestationAggregator {
    /// Sort findings into report order, count them, and assemble the
    /// header. Several rulepack identities are joined with `+`.
    pub fn aggregate(
        mut findings: Vec<Finding>,
        identities: &[RulepackIdentity],
        meta: &RunMetadata,
    ) -> Result<Attestation, AttestationError> {
        findings.sort_by(|a, b| a.sort_cmp(b));

        let fail_count = findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Fail)
            .count();
        let warn_count = findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Warn)
            .count();

        let (rulepack_id, rulepack_version) = if identities.is_empty() {
            (UNKNOWN_RULEPACK.to_string(), UNKNOWN_VERSION.to_string())
        } else {
            (
                join(identities.iter().map(|i| i.id.as_str())),
                join(identities.iter().map(|i| i.version.as_str())),
            )
        };

        let attestation = Attestation {
            rulepack_id,
            rulepack_version,
            fairy_version: meta.fairy_version.clone(),
            run_at_utc: meta.run_at_utc(),
            submission_ready: fail_count == 0,
            fail_count,
            warn_count,
            findings,
        };

        if let Err(e) = attestation.verify() {
            tracing::error!(target: "fairy::internal", error = %e, "attestation invariant violated");
            return Err(e);
        }

        tracing::info!(
            rulepack = %attestation.rulepack_id,
            fail_count,
            warn_count,
            submission_ready = attestation.submission_ready,
            "attestation assembled"
        );
        Ok(attestation)
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join("+")
}
