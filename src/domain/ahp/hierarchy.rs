//! Criterion Hierarchy - Weighted criterion tree built from comparison judgements.
//!
//! The configuration lists top-level criteria (optionally with sub-criteria)
//! and one matrix comparing the top-level criteria. Construction attaches a
//! local weight to every node and records one consistency entry per matrix.
//!
//! The tree is uniform: a synthetic goal node sits at the root and owns the
//! top-level matrix, so every internal node is handled the same way.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{
    ConfigurationError, ConsistencyChecker, PairwiseMatrix, WeightDeriver, CONSISTENCY_THRESHOLD,
};

/// Id of the synthetic root node owning the top-level matrix.
pub const GOAL_ID: &str = "goal";

/// Maximum depth below the goal (criteria, then sub-criteria).
pub const MAX_CRITERIA_DEPTH: usize = 2;

/// Static description of the comparison hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Top-level criteria in matrix order.
    pub criteria: Vec<CriterionConfig>,
    /// Pairwise comparisons between the top-level criteria.
    pub comparisons: Vec<Vec<f64>>,
}

/// One criterion in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionConfig {
    pub id: String,
    pub name: String,
    /// Sub-criteria in matrix order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CriterionConfig>,
    /// Pairwise comparisons between the sub-criteria. Required iff children exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparisons: Option<Vec<Vec<f64>>>,
}

impl CriterionConfig {
    /// Creates a leaf criterion.
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
            comparisons: None,
        }
    }

    /// Creates a criterion owning sub-criteria and their comparison matrix.
    pub fn parent(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<CriterionConfig>,
        comparisons: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children,
            comparisons: Some(comparisons),
        }
    }
}

/// A node of the weighted hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionNode {
    pub id: String,
    pub name: String,
    /// Weight among siblings (siblings sum to 1).
    pub weight: f64,
    /// Product of weights along the path from the goal.
    pub global_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<PairwiseMatrix>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CriterionNode>,
}

impl CriterionNode {
    /// A node without children is scored directly against patient data.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Collects leaf ids beneath (or equal to) this node, in tree order.
    pub fn leaf_ids(&self) -> Vec<&str> {
        if self.is_leaf() {
            return vec![self.id.as_str()];
        }
        self.children.iter().flat_map(|c| c.leaf_ids()).collect()
    }
}

/// Consistency diagnostics for one matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixConsistency {
    /// Id of the node owning the matrix (`goal` for the top level).
    pub matrix_id: String,
    pub size: usize,
    pub lambda_max: f64,
    pub ci: f64,
    pub cr: f64,
    pub consistent: bool,
    /// Whether `m[j][i] == 1 / m[i][j]` held for the supplied judgements.
    pub reciprocal: bool,
}

/// Consistency diagnostics for every matrix in a hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub matrices: Vec<MatrixConsistency>,
    pub any_inconsistent: bool,
    pub threshold: f64,
}

impl ConsistencyReport {
    fn new(matrices: Vec<MatrixConsistency>) -> Self {
        let any_inconsistent = matrices.iter().any(|m| !m.consistent);
        Self {
            matrices,
            any_inconsistent,
            threshold: CONSISTENCY_THRESHOLD,
        }
    }

    /// Matrices whose CR exceeds the threshold.
    pub fn inconsistent(&self) -> impl Iterator<Item = &MatrixConsistency> {
        self.matrices.iter().filter(|m| !m.consistent)
    }

    /// Looks up the entry for a matrix id.
    pub fn get(&self, matrix_id: &str) -> Option<&MatrixConsistency> {
        self.matrices.iter().find(|m| m.matrix_id == matrix_id)
    }
}

/// Resolved weight of one criterion, for audit display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeight {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub global_weight: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_criteria: Vec<CriterionWeight>,
}

impl From<&CriterionNode> for CriterionWeight {
    fn from(node: &CriterionNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            weight: node.weight,
            global_weight: node.global_weight,
            sub_criteria: node.children.iter().map(CriterionWeight::from).collect(),
        }
    }
}

/// Weighted criterion tree plus its consistency report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionHierarchy {
    root: CriterionNode,
    consistency: ConsistencyReport,
}

impl CriterionHierarchy {
    /// Builds the weighted hierarchy from configuration.
    ///
    /// Inconsistent matrices are reported, never rejected. Structural problems
    /// (bad matrices, missing or surplus matrices, duplicate ids, excess depth)
    /// are configuration errors.
    pub fn build(config: &HierarchyConfig) -> Result<Self, ConfigurationError> {
        if config.criteria.is_empty() {
            return Err(ConfigurationError::EmptyHierarchy);
        }

        let goal = CriterionConfig::parent(
            GOAL_ID,
            "Goal",
            config.criteria.clone(),
            config.comparisons.clone(),
        );

        let mut seen = HashSet::new();
        check_ids(&goal, 0, &mut seen)?;

        let mut reports = Vec::new();
        let root = build_node(&goal, 1.0, 1.0, &mut reports)?;

        Ok(Self {
            root,
            consistency: ConsistencyReport::new(reports),
        })
    }

    /// The synthetic goal node.
    pub fn root(&self) -> &CriterionNode {
        &self.root
    }

    /// Top-level criteria in configuration order.
    pub fn top_level(&self) -> &[CriterionNode] {
        &self.root.children
    }

    /// All leaf criterion ids in tree order.
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.root.leaf_ids()
    }

    /// Consistency diagnostics for every matrix.
    pub fn consistency(&self) -> &ConsistencyReport {
        &self.consistency
    }

    /// Resolved weights of the top-level criteria and their sub-criteria.
    pub fn weights(&self) -> Vec<CriterionWeight> {
        self.top_level().iter().map(CriterionWeight::from).collect()
    }
}

fn check_ids<'a>(
    node: &'a CriterionConfig,
    depth: usize,
    seen: &mut HashSet<&'a str>,
) -> Result<(), ConfigurationError> {
    if node.id.trim().is_empty() {
        return Err(ConfigurationError::EmptyCriterionId);
    }
    if depth > MAX_CRITERIA_DEPTH {
        return Err(ConfigurationError::HierarchyTooDeep {
            criterion_id: node.id.clone(),
            max_depth: MAX_CRITERIA_DEPTH,
        });
    }
    if !seen.insert(node.id.as_str()) {
        return Err(ConfigurationError::DuplicateCriterion {
            criterion_id: node.id.clone(),
        });
    }
    for child in &node.children {
        check_ids(child, depth + 1, seen)?;
    }
    Ok(())
}

fn build_node(
    config: &CriterionConfig,
    weight: f64,
    global_weight: f64,
    reports: &mut Vec<MatrixConsistency>,
) -> Result<CriterionNode, ConfigurationError> {
    if config.children.is_empty() {
        if config.comparisons.is_some() {
            return Err(ConfigurationError::UnexpectedMatrix {
                criterion_id: config.id.clone(),
            });
        }
        return Ok(CriterionNode {
            id: config.id.clone(),
            name: config.name.clone(),
            weight,
            global_weight,
            matrix: None,
            children: Vec::new(),
        });
    }

    let rows = config
        .comparisons
        .clone()
        .ok_or_else(|| ConfigurationError::MissingMatrix {
            criterion_id: config.id.clone(),
        })?;
    let matrix = PairwiseMatrix::new(&config.id, rows)?;
    if matrix.size() != config.children.len() {
        return Err(ConfigurationError::MatrixSizeMismatch {
            matrix_id: config.id.clone(),
            expected: config.children.len(),
            actual: matrix.size(),
        });
    }

    let child_weights = WeightDeriver::derive(&matrix);
    if WeightDeriver::is_degenerate(&child_weights) {
        return Err(ConfigurationError::DegenerateWeights {
            matrix_id: config.id.clone(),
        });
    }

    let result = ConsistencyChecker::check(&matrix, &child_weights);
    reports.push(MatrixConsistency {
        matrix_id: config.id.clone(),
        size: matrix.size(),
        lambda_max: result.lambda_max,
        ci: result.ci,
        cr: result.cr,
        consistent: result.consistent,
        reciprocal: matrix.is_reciprocal(),
    });

    let children = config
        .children
        .iter()
        .zip(child_weights.iter())
        .map(|(child, &w)| build_node(child, w, global_weight * w, reports))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CriterionNode {
        id: config.id.clone(),
        name: config.name.clone(),
        weight,
        global_weight,
        matrix: Some(matrix),
        children,
    })
}
