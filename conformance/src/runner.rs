//! Test tree and runner
//!
//! Cases are registered into a [`TestCaseGroup`] tree and executed in
//! insertion order by a [`TestRunner`]. A failing, unsupported or panicking
//! case only affects its own result.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::{ConformanceError, ConformanceResult, HarnessConfig};

/// A single executable conformance case
pub trait TestCase {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Acquire resources; an error skips `iterate`
    fn init(&mut self) -> ConformanceResult<()> {
        Ok(())
    }

    /// Run the case once
    fn iterate(&mut self) -> ConformanceResult<()>;

    /// Release resources; always called after `init`
    fn deinit(&mut self) {}
}

/// A node of the test tree
pub enum TestNode<'a> {
    Case(Box<dyn TestCase + 'a>),
    Group(TestCaseGroup<'a>),
}

impl TestNode<'_> {
    pub fn name(&self) -> &str {
        match self {
            TestNode::Case(case) => case.name(),
            TestNode::Group(group) => group.name(),
        }
    }
}

/// Named group of cases and nested groups
pub struct TestCaseGroup<'a> {
    name: String,
    description: String,
    children: Vec<TestNode<'a>>,
}

impl<'a> TestCaseGroup<'a> {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn children(&self) -> &[TestNode<'a>] {
        &self.children
    }

    pub fn add_child(&mut self, node: TestNode<'a>) -> &mut Self {
        self.children.push(node);
        self
    }

    pub fn add_case(&mut self, case: impl TestCase + 'a) -> &mut Self {
        self.add_child(TestNode::Case(Box::new(case)))
    }

    pub fn add_group(&mut self, group: TestCaseGroup<'a>) -> &mut Self {
        self.add_child(TestNode::Group(group))
    }

    /// Number of cases in this group and all nested groups
    pub fn case_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                TestNode::Case(_) => 1,
                TestNode::Group(group) => group.case_count(),
            })
            .sum()
    }
}

/// Outcome of a single case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    Pass,
    Fail,
    NotSupported,
    /// The case panicked
    InternalError,
}

impl TestStatus {
    fn from_result(result: &ConformanceResult<()>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(err) if err.is_not_supported() => Self::NotSupported,
            Err(_) => Self::Fail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    /// Dot-separated path from the root group, e.g. `image_source.texture_2d_rgba_unsigned_byte`
    pub path: String,
    pub status: TestStatus,
    pub message: String,
}

/// Results of a run in execution order
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    results: Vec<CaseResult>,
}

impl RunSummary {
    pub fn results(&self) -> &[CaseResult] {
        &self.results
    }

    pub fn count(&self, status: TestStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn get(&self, path: &str) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.path == path)
    }

    /// True when nothing failed; unsupported cases do not count as failures
    pub fn all_passed(&self) -> bool {
        self.results
            .iter()
            .all(|r| matches!(r.status, TestStatus::Pass | TestStatus::NotSupported))
    }
}

/// Executes a test tree
#[derive(Debug, Clone, Default)]
pub struct TestRunner {
    config: HarnessConfig,
}

impl TestRunner {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run every case under `root` in registration order
    pub fn run(&self, root: &mut TestCaseGroup<'_>) -> RunSummary {
        let mut summary = RunSummary::default();
        let prefix = root.name.clone();
        self.run_group(&prefix, root, &mut summary);
        log::info!(
            "{}: {} passed, {} failed, {} not supported, {} internal errors",
            prefix,
            summary.count(TestStatus::Pass),
            summary.count(TestStatus::Fail),
            summary.count(TestStatus::NotSupported),
            summary.count(TestStatus::InternalError)
        );
        summary
    }

    fn run_group(&self, prefix: &str, group: &mut TestCaseGroup<'_>, summary: &mut RunSummary) {
        for child in &mut group.children {
            match child {
                TestNode::Case(case) => {
                    let path = format!("{prefix}.{}", case.name());
                    let result = self.run_case(path, case.as_mut());
                    summary.results.push(result);
                }
                TestNode::Group(nested) => {
                    let path = format!("{prefix}.{}", nested.name);
                    self.run_group(&path, nested, summary);
                }
            }
        }
    }

    fn run_case(&self, path: String, case: &mut dyn TestCase) -> CaseResult {
        #[cfg(feature = "tracing")]
        let _span = crate::logging::case_span(&path).entered();
        log::debug!("Running {path}");

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let result = case.init().and_then(|()| case.iterate());
            case.deinit();
            result
        }));

        let (status, message) = match outcome {
            Ok(result) => {
                let status = TestStatus::from_result(&result);
                let message = match result {
                    Ok(()) => String::from("Pass"),
                    Err(ConformanceError::NotSupported { reason }) => reason,
                    Err(err) => err.to_string(),
                };
                (status, message)
            }
            Err(payload) => (TestStatus::InternalError, panic_message(payload.as_ref())),
        };

        match status {
            TestStatus::Pass if self.config.log_passes => log::info!("{path}: pass"),
            TestStatus::Pass => log::debug!("{path}: pass"),
            TestStatus::NotSupported => log::info!("{path}: not supported ({message})"),
            TestStatus::Fail => log::warn!("{path}: fail ({message})"),
            TestStatus::InternalError => log::error!("{path}: internal error ({message})"),
        }

        CaseResult {
            path,
            status,
            message,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("panic with non-string payload")
    }
}
