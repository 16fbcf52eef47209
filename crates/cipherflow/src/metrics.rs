//! Side-by-side comparison table of the two pipelines.

use std::fmt;

use crate::model::{Comparison, ComparisonMetrics};

/// One row of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Algorithm,
    PublicKeySize,
    PayloadSize,
    QuantumSafe,
}

impl Metric {
    /// Rows in display order.
    pub const ALL: [Metric; 4] = [
        Metric::Algorithm,
        Metric::PublicKeySize,
        Metric::PayloadSize,
        Metric::QuantumSafe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Algorithm => "Algorithm",
            Self::PublicKeySize => "Public Key Size",
            Self::PayloadSize => "Encapsulation/Payload Size",
            Self::QuantumSafe => "Quantum-Safe Status",
        }
    }

    /// Field of [`ComparisonMetrics`] the row is sourced from.
    pub fn key(self) -> &'static str {
        match self {
            Self::Algorithm => "algo",
            Self::PublicKeySize => "pk_size",
            Self::PayloadSize => "ct_size",
            Self::QuantumSafe => "quantum_safe",
        }
    }

    fn value(self, metrics: &ComparisonMetrics) -> &str {
        match self {
            Self::Algorithm => metrics.algo(),
            Self::PublicKeySize => metrics.pk_size(),
            Self::PayloadSize => metrics.ct_size(),
            Self::QuantumSafe => metrics.quantum_safe(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsRow {
    metric: Metric,
    classical: String,
    pqc: String,
}

impl MetricsRow {
    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn label(&self) -> &'static str {
        self.metric.label()
    }

    pub fn classical(&self) -> &str {
        &self.classical
    }

    pub fn pqc(&self) -> &str {
        &self.pqc
    }
}

/// The four fixed comparison rows, classical value beside pqc value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsTable {
    rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        let rows = Metric::ALL
            .iter()
            .map(|&metric| MetricsRow {
                metric,
                classical: metric.value(comparison.classical()).to_string(),
                pqc: metric.value(comparison.pqc()).to_string(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }
}

impl fmt::Display for MetricsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEADER: [&str; 3] = ["Metric", "Classical", "Post-Quantum"];

        let widths = self.rows.iter().fold(
            HEADER.map(|title| title.chars().count()),
            |[label, classical, pqc], row| {
                [
                    label.max(row.label().chars().count()),
                    classical.max(row.classical.chars().count()),
                    pqc.max(row.pqc.chars().count()),
                ]
            },
        );

        writeln!(
            f,
            "{:<w0$} | {:<w1$} | {}",
            HEADER[0],
            HEADER[1],
            HEADER[2],
            w0 = widths[0],
            w1 = widths[1]
        )?;
        writeln!(
            f,
            "{}-+-{}-+-{}",
            "-".repeat(widths[0]),
            "-".repeat(widths[1]),
            "-".repeat(widths[2])
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<w0$} | {:<w1$} | {}",
                row.label(),
                row.classical,
                row.pqc,
                w0 = widths[0],
                w1 = widths[1]
            )?;
        }
        Ok(())
    }
}
