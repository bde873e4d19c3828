use std::env;
use std::str::FromStr;

use super::models::{ResponseStatus, StepResult};

/// Environment variable selecting the [`FailurePolicy`].
pub const FAILURE_POLICY_ENV: &str = "CFN_FAILURE_POLICY";

/// How failed Amazon Connect calls are reported back to CloudFormation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Always report `SUCCESS`; failures only show up in the logs.
    #[default]
    AlwaysSucceed,
    /// Report `FAILED` when any individual call failed.
    ReportFailures,
}

impl FailurePolicy {
    /// Lifecycle status and optional reason for a set of step results.
    #[must_use]
    pub fn resolve<'a, I>(self, steps: I) -> (ResponseStatus, Option<String>)
    where
        I: IntoIterator<Item = &'a StepResult>,
    {
        if self == FailurePolicy::AlwaysSucceed {
            return (ResponseStatus::Success, None);
        }

        let failures: Vec<&str> = steps
            .into_iter()
            .filter(|step| !step.is_success())
            .map(|step| step.message.as_str())
            .collect();

        if failures.is_empty() {
            (ResponseStatus::Success, None)
        } else {
            (ResponseStatus::Failed, Some(failures.join("; ")))
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "always-succeed" => Ok(Self::AlwaysSucceed),
            "report-failures" => Ok(Self::ReportFailures),
            other => Err(format!(
                "{FAILURE_POLICY_ENV}: unknown policy '{other}' (expected always-succeed or report-failures)"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub failure_policy: FailurePolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            failure_policy: env::var(FAILURE_POLICY_ENV)
                .ok()
                .map(|v| v.parse::<FailurePolicy>())
                .transpose()?
                .unwrap_or_default(),
        })
    }
}
