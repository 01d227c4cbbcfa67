use serde::{Deserialize, Serialize};

/// Default output alpha for blend shapes that do not carry their own alpha formula.
pub const UNION_ALPHA: &str = "aA + aB - aA * aB";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One row of the operation table: everything needed to generate a single C source file.
pub struct OperationSpec {
    /// Table name, words joined with `_` (`color_dodge`).
    pub name: String,
    /// Shape-specific formulas.
    #[serde(flatten)]
    pub kind: OpKind,
    /// Opaque regression hash echoed into the registration keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_hash: Option<String>,
    /// Prefix applied to the file and primary registration name when the plain name is already
    /// claimed by an earlier family. Assigned by the table loader.
    #[serde(skip)]
    pub collision_prefix: Option<String>,
}

impl OperationSpec {
    /// Build an entry without a reference hash or collision prefix.
    pub fn new(name: impl Into<String>, kind: OpKind) -> Self {
        Self {
            name: name.into(),
            kind,
            reference_hash: None,
            collision_prefix: None,
        }
    }

    /// Attach the opaque reference hash.
    pub fn with_reference_hash(mut self, hash: impl Into<String>) -> Self {
        self.reference_hash = Some(hash.into());
        self
    }

    /// Attach a collision prefix (normally done by [`crate::OpTable`]).
    pub fn with_collision_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.collision_prefix = Some(prefix.into());
        self
    }

    /// Shape of this entry.
    pub fn shape(&self) -> Shape {
        self.kind.shape()
    }

    /// Generator family of this entry.
    pub fn family(&self) -> Family {
        self.kind.shape().family()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
/// Formula slots of an operation, one variant per shape.
pub enum OpKind {
    /// Single-operand math: `formula` assigns `result` from `input` and `value`.
    Direct {
        /// Statement computing `result`.
        formula: String,
        /// Default for the `value` property.
        default_value: f64,
    },
    /// Unconditional blend of `cA`/`cB` with union alpha.
    TwoOperand {
        /// Channel formula.
        formula: String,
    },
    /// `if condition then else otherwise` blend with union alpha.
    OneCondition {
        /// Runtime condition.
        condition: String,
        /// Channel formula when `condition` holds.
        then: String,
        /// Channel formula otherwise.
        otherwise: String,
    },
    /// `if / else if / else` blend with union alpha.
    TwoCondition {
        /// First runtime condition.
        first_condition: String,
        /// Channel formula when `first_condition` holds.
        first: String,
        /// Second runtime condition.
        second_condition: String,
        /// Channel formula when only `second_condition` holds.
        second: String,
        /// Channel formula otherwise.
        otherwise: String,
    },
    /// Unconditional blend whose output alpha comes from `alpha`.
    AlphaPair {
        /// Channel formula.
        formula: String,
        /// Output alpha formula.
        alpha: String,
    },
    /// Porter-Duff compositing operator: unclamped colour formula plus alpha formula.
    PorterDuff {
        /// Channel formula.
        formula: String,
        /// Output alpha formula.
        alpha: String,
    },
}

impl OpKind {
    /// Fieldless discriminant.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Direct { .. } => Shape::Direct,
            Self::TwoOperand { .. } => Shape::TwoOperand,
            Self::OneCondition { .. } => Shape::OneCondition,
            Self::TwoCondition { .. } => Shape::TwoCondition,
            Self::AlphaPair { .. } => Shape::AlphaPair,
            Self::PorterDuff { .. } => Shape::PorterDuff,
        }
    }

    /// Every formula and condition string, in kernel order, keyed by its table field name.
    pub fn formula_fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Direct { formula, .. } | Self::TwoOperand { formula } => {
                vec![("formula", formula.as_str())]
            }
            Self::OneCondition {
                condition,
                then,
                otherwise,
            } => vec![
                ("condition", condition.as_str()),
                ("then", then.as_str()),
                ("otherwise", otherwise.as_str()),
            ],
            Self::TwoCondition {
                first_condition,
                first,
                second_condition,
                second,
                otherwise,
            } => vec![
                ("first_condition", first_condition.as_str()),
                ("first", first.as_str()),
                ("second_condition", second_condition.as_str()),
                ("second", second.as_str()),
                ("otherwise", otherwise.as_str()),
            ],
            Self::AlphaPair { formula, alpha } | Self::PorterDuff { formula, alpha } => {
                vec![("formula", formula.as_str()), ("alpha", alpha.as_str())]
            }
        }
    }

    /// Output alpha expression used by the blend-family kernels.
    pub fn alpha_formula(&self) -> Option<&str> {
        match self {
            Self::Direct { .. } => None,
            Self::TwoOperand { .. } | Self::OneCondition { .. } | Self::TwoCondition { .. } => {
                Some(UNION_ALPHA)
            }
            Self::AlphaPair { alpha, .. } | Self::PorterDuff { alpha, .. } => Some(alpha),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Structural category of an operation.
pub enum Shape {
    /// Constant-or-aux math operation.
    Direct,
    /// Unconditional blend.
    TwoOperand,
    /// Two-branch blend.
    OneCondition,
    /// Three-branch blend.
    TwoCondition,
    /// Blend with explicit alpha formula.
    AlphaPair,
    /// Porter-Duff operator.
    PorterDuff,
}

impl Shape {
    /// All shapes in table grouping order.
    pub const ALL: [Shape; 6] = [
        Shape::Direct,
        Shape::TwoOperand,
        Shape::OneCondition,
        Shape::TwoCondition,
        Shape::AlphaPair,
        Shape::PorterDuff,
    ];

    /// Generator family this shape belongs to.
    pub fn family(self) -> Family {
        match self {
            Shape::Direct => Family::Math,
            Shape::TwoOperand | Shape::OneCondition | Shape::TwoCondition | Shape::AlphaPair => {
                Family::SvgBlend
            }
            Shape::PorterDuff => Family::PorterDuff,
        }
    }

    /// Snake-case label as used in the table.
    pub fn label(self) -> &'static str {
        match self {
            Shape::Direct => "direct",
            Shape::TwoOperand => "two_operand",
            Shape::OneCondition => "one_condition",
            Shape::TwoCondition => "two_condition",
            Shape::AlphaPair => "alpha_pair",
            Shape::PorterDuff => "porter_duff",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Generator family; earlier variants win name claims over later ones.
pub enum Family {
    /// Per-pixel math against a constant or aux buffer.
    Math,
    /// SVG 1.2 blend modes.
    SvgBlend,
    /// SVG 1.2 Porter-Duff operators.
    PorterDuff,
}

impl Family {
    /// Families in name-claim precedence order.
    pub const ALL: [Family; 3] = [Family::Math, Family::SvgBlend, Family::PorterDuff];

    /// Generator label written into the provenance header.
    pub fn generator(self) -> &'static str {
        match self {
            Family::Math => "math",
            Family::SvgBlend => "svg-12-blend",
            Family::PorterDuff => "svg-12-porter-duff",
        }
    }

    /// Operation category key.
    pub fn category(self) -> &'static str {
        match self {
            Family::Math => "compositors:math",
            Family::SvgBlend => "compositors:svgfilter",
            Family::PorterDuff => "compositors:porter-duff",
        }
    }

    /// Prefix used when an entry's plain name is already claimed by an earlier family.
    pub fn collision_prefix(self) -> Option<&'static str> {
        match self {
            Family::Math => None,
            Family::SvgBlend | Family::PorterDuff => Some("svg-"),
        }
    }
}
