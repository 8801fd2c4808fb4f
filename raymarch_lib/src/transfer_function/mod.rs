//! Transfer function, maps intensity to color and opacity
//!
//! Defined by nodes sorted by input value, values between nodes are
//! linearly interpolated. Caller must keep a node at 0 and a node at 1,
//! otherwise some intensities are not covered.
//!
//! Queries go through lookup tables sampled in steps of [`LOOKUP_TABLE_PRECISION`].
//! Tables are **not** rebuilt on edit, call [`TransferFunction::recalculate_lookup_tables`]
//! after changing nodes.

mod shared;

pub use shared::SharedTransferFunction;

use crate::{
    color::{self, RGB},
    error::TransferFunctionError,
};

/// Distance between two lookup table entries
pub const LOOKUP_TABLE_PRECISION: f32 = 0.01;

/// Entries for <0;1> inclusive
const LOOKUP_TABLE_LEN: usize = 101;

/// One control point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfNode {
    pub input_value: f32,
    pub output_opacity: f32,
    pub output_color: RGB,
}

impl TfNode {
    pub fn new(input_value: f32, output_opacity: f32, output_color: RGB) -> TfNode {
        TfNode {
            input_value,
            output_opacity,
            output_color,
        }
    }
}

fn linear_interpolate(x: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Colors and opacities sampled over <0;1>
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTables {
    colors: Vec<RGB>,
    opacities: Vec<f32>,
}

impl LookupTables {
    fn sample<C, O>(color: C, opacity: O) -> Result<LookupTables, TransferFunctionError>
    where
        C: Fn(f32) -> Result<RGB, TransferFunctionError>,
        O: Fn(f32) -> Result<f32, TransferFunctionError>,
    {
        let mut colors = Vec::with_capacity(LOOKUP_TABLE_LEN);
        let mut opacities = Vec::with_capacity(LOOKUP_TABLE_LEN);

        for i in 0..LOOKUP_TABLE_LEN {
            let value = i as f32 / (LOOKUP_TABLE_LEN - 1) as f32;
            colors.push(color(value)?);
            opacities.push(opacity(value)?);
        }

        Ok(LookupTables { colors, opacities })
    }

    /// Tables of the default transfer function, gray ramp
    fn linear_ramp() -> LookupTables {
        let values = (0..LOOKUP_TABLE_LEN).map(|i| i as f32 / (LOOKUP_TABLE_LEN - 1) as f32);
        LookupTables {
            colors: values.clone().map(color::mono).collect(),
            opacities: values.collect(),
        }
    }

    // Values outside of <0;1> clamp to the first/last entry
    fn index(value: f32) -> usize {
        let index = (value.clamp(0.0, 1.0) * (LOOKUP_TABLE_LEN - 1) as f32).round() as usize;
        usize::min(index, LOOKUP_TABLE_LEN - 1)
    }

    /// Color of the nearest entry
    pub fn color(&self, value: f32) -> RGB {
        self.colors[Self::index(value)]
    }

    /// Opacity of the nearest entry
    pub fn opacity(&self, value: f32) -> f32 {
        self.opacities[Self::index(value)]
    }
}

/// Transfer function, editable by nodes
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    nodes: Vec<TfNode>,
    tables: LookupTables,
}

impl TransferFunction {
    /// Two nodes, 0 is black and transparent, 1 is white and opaque
    pub fn new() -> TransferFunction {
        TransferFunction {
            nodes: vec![
                TfNode::new(0.0, 0.0, color::zero()),
                TfNode::new(1.0, 1.0, color::mono(1.0)),
            ],
            tables: LookupTables::linear_ramp(),
        }
    }

    /// Construct from any nodes, lookup tables are computed
    pub fn from_nodes(nodes: Vec<TfNode>) -> Result<TransferFunction, TransferFunctionError> {
        let mut tf = TransferFunction {
            nodes,
            tables: LookupTables::linear_ramp(),
        };
        tf.sort_nodes();
        tf.recalculate_lookup_tables()?;
        Ok(tf)
    }

    pub fn nodes(&self) -> &[TfNode] {
        &self.nodes
    }

    /// Mutable access to node, call [`sort_nodes`](Self::sort_nodes) after changing input value
    pub fn node_mut(&mut self, index: usize) -> Option<&mut TfNode> {
        self.nodes.get_mut(index)
    }

    pub fn lookup_tables(&self) -> &LookupTables {
        &self.tables
    }

    /// Color from lookup table
    ///
    /// # Errors
    ///
    /// [`OutOfDomain`](TransferFunctionError::OutOfDomain) for values outside of <0;1>
    pub fn color_at(&self, value: f32) -> Result<RGB, TransferFunctionError> {
        Self::check_domain(value)?;
        Ok(self.tables.color(value))
    }

    /// Opacity from lookup table
    pub fn opacity_at(&self, value: f32) -> Result<f32, TransferFunctionError> {
        Self::check_domain(value)?;
        Ok(self.tables.opacity(value))
    }

    /// Color interpolated from nodes, bypasses lookup table
    pub fn compute_color(&self, value: f32) -> Result<RGB, TransferFunctionError> {
        let (lower, higher) = self.neighbouring_nodes(value)?;

        if higher.input_value == lower.input_value {
            return Ok(higher.output_color);
        }

        let color = lower.output_color.zip_map(&higher.output_color, |y0, y1| {
            linear_interpolate(value, lower.input_value, y0, higher.input_value, y1)
        });
        Ok(color)
    }

    /// Opacity interpolated from nodes, bypasses lookup table
    pub fn compute_opacity(&self, value: f32) -> Result<f32, TransferFunctionError> {
        let (lower, higher) = self.neighbouring_nodes(value)?;

        if higher.input_value == lower.input_value {
            return Ok(higher.output_opacity);
        }

        Ok(linear_interpolate(
            value,
            lower.input_value,
            lower.output_opacity,
            higher.input_value,
            higher.output_opacity,
        ))
    }

    /// Insert node, nodes stay sorted
    ///
    /// Node with the same input value as an existing one is placed after it.
    pub fn add_node(&mut self, input_value: f32, output_opacity: f32, output_color: RGB) {
        self.nodes
            .push(TfNode::new(input_value, output_opacity, output_color));
        self.sort_nodes();
    }

    /// Remove node, the first and the last node cannot be removed
    pub fn remove_node(&mut self, index: usize) -> Result<TfNode, TransferFunctionError> {
        if index >= self.nodes.len() {
            return Err(TransferFunctionError::NodeIndex(index));
        }
        if index == 0 || index == self.nodes.len() - 1 {
            return Err(TransferFunctionError::BoundaryNodeRemoval(index));
        }
        Ok(self.nodes.remove(index))
    }

    /// Stable sort by input value
    pub fn sort_nodes(&mut self) {
        self.nodes
            .sort_by(|a, b| a.input_value.total_cmp(&b.input_value));
    }

    /// Resample nodes into lookup tables
    ///
    /// On error, previous tables are kept.
    pub fn recalculate_lookup_tables(&mut self) -> Result<(), TransferFunctionError> {
        self.check_boundary_nodes()?;
        let tables = LookupTables::sample(|v| self.compute_color(v), |v| self.compute_opacity(v))?;
        self.tables = tables;
        Ok(())
    }

    fn check_boundary_nodes(&self) -> Result<(), TransferFunctionError> {
        match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) if first.input_value <= 0.0 && last.input_value >= 1.0 => {
                Ok(())
            }
            _ => Err(TransferFunctionError::MissingBoundaryNode),
        }
    }

    fn check_domain(value: f32) -> Result<(), TransferFunctionError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(TransferFunctionError::OutOfDomain(value))
        }
    }

    // First pair of nodes around `value`
    fn neighbouring_nodes(&self, value: f32) -> Result<(&TfNode, &TfNode), TransferFunctionError> {
        self.nodes
            .windows(2)
            .find(|pair| pair[0].input_value <= value && value <= pair[1].input_value)
            .map(|pair| (&pair[0], &pair[1]))
            .ok_or(TransferFunctionError::OutOfDomain(value))
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        Self::new()
    }
}
