//! Structured valuation trace.
//!
//! The trace is an ordered record of per-node intermediate values, built
//! once after the induction pass. Test suites and audit tooling assert on it
//! deterministically instead of capturing console output.

use chimera_core::types::Date;
use serde::{Deserialize, Serialize};

use crate::lattice::{LatticeGrid, TimeGrid};

use super::engine::SplitSurfaces;
use super::result::LatticeParams;

/// Intermediate values of one lattice node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceNode {
    /// Stock price at the node.
    pub stock_price: f64,
    /// Conversion price at the node.
    pub conversion_price: f64,
    /// Debt-component value at the node.
    pub debt: f64,
    /// Equity-component value at the node.
    pub equity: f64,
}

/// All node records of one time step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Step index, 0 = valuation date.
    pub step: usize,
    /// Calendar date the step maps to.
    pub date: Date,
    /// Node records, state 0 (lowest) upward.
    pub nodes: Vec<TraceNode>,
}

/// Ordered per-step records of one pricing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationTrace {
    /// Derived model parameters (absent for the zero-maturity boundary).
    pub params: Option<LatticeParams>,
    /// One record per step, root first.
    pub steps: Vec<TraceStep>,
}

impl ValuationTrace {
    /// Assembles the trace from the forward trees and value surfaces.
    pub(crate) fn from_surfaces(
        time: &TimeGrid,
        stock: &LatticeGrid,
        conversion: &LatticeGrid,
        surfaces: &SplitSurfaces,
        params: LatticeParams,
    ) -> Self {
        let steps = (0..=time.steps())
            .map(|step| TraceStep {
                step,
                date: time.date_at(step),
                nodes: (0..stock.states_at(step))
                    .map(|state| TraceNode {
                        stock_price: stock.value_at(step, state),
                        conversion_price: conversion.value_at(step, state),
                        debt: surfaces.debt.value_at(step, state),
                        equity: surfaces.equity.value_at(step, state),
                    })
                    .collect(),
            })
            .collect();

        Self {
            params: Some(params),
            steps,
        }
    }

    /// Builds the single-record trace of a zero-maturity valuation.
    pub(crate) fn degenerate(date: Date, node: TraceNode) -> Self {
        Self {
            params: None,
            steps: vec![TraceStep {
                step: 0,
                date,
                nodes: vec![node],
            }],
        }
    }

    /// Returns the root node record, if the trace is non-empty.
    #[must_use]
    pub fn root(&self) -> Option<&TraceNode> {
        self.steps.first().and_then(|step| step.nodes.first())
    }

    /// Returns the terminal step record, if the trace is non-empty.
    #[must_use]
    pub fn terminal(&self) -> Option<&TraceStep> {
        self.steps.last()
    }
}
