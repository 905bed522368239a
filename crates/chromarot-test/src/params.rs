//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use chromarot_core::{PixelBuffer, Plane};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and report failures (default)
    #[default]
    Compare,
    /// Compare with verbose output
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, current comparison index, mode, and any failures.
pub struct RegParams {
    /// Name of the test (e.g., "rotate")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.index, diff, delta, expected, actual
            ));
            false
        } else {
            if self.display() {
                eprintln!("  [{}] {} ~ {} (delta {})", self.index, expected, actual, delta);
            }
            true
        }
    }

    /// Compare two planes for exact equality
    pub fn compare_planes(&mut self, plane1: &Plane, plane2: &Plane) -> bool {
        self.index += 1;

        if !plane1.same_size(plane2) {
            self.fail(format!(
                "plane comparison for index {} - size {:?} vs {:?}",
                self.index,
                plane1.dimensions(),
                plane2.dimensions()
            ));
            return false;
        }

        let (w, h) = plane1.dimensions();
        for y in 0..h {
            for x in 0..w {
                if plane1.get_unchecked(x, y) != plane2.get_unchecked(x, y) {
                    self.fail(format!(
                        "plane comparison for index {} - sample mismatch at ({}, {})",
                        self.index, x, y
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Compare two buffers for exact equality (layout, size, and samples)
    pub fn compare_buffers(&mut self, buf1: &PixelBuffer, buf2: &PixelBuffer) -> bool {
        self.index += 1;

        if buf1.layout() != buf2.layout() || buf1.dimensions() != buf2.dimensions() {
            self.fail(format!(
                "buffer comparison for index {} - {:?} {:?} vs {:?} {:?}",
                self.index,
                buf1.layout(),
                buf1.dimensions(),
                buf2.layout(),
                buf2.dimensions()
            ));
            return false;
        }

        for (c, (p1, p2)) in buf1.planes().iter().zip(buf2.planes()).enumerate() {
            if p1 != p2 {
                self.fail(format!(
                    "buffer comparison for index {} - channel {} differs",
                    self.index, c
                ));
                return false;
            }
        }

        true
    }

    /// Record a failure message.
    fn fail(&mut self, detail: String) {
        let msg = format!("Failure in {}_reg: {}", self.test_name, detail);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        self.finish().is_ok()
    }

    /// Report results as a `Result`.
    pub fn finish(self) -> TestResult<()> {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
            eprintln!();
            return Ok(());
        }

        eprintln!("FAILURE: {}_reg", self.test_name);
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        eprintln!();
        Err(TestError::RegressionFailed {
            test_name: self.test_name,
            count: self.failures.len(),
        })
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
