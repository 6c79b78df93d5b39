//! Built-in sample expressions used by the CLI and the integration tests.

use bumpalo::Bump;

use crate::{Error, Expression, ExpressionBuilder, Node};

/// A named expression together with arguments that exercise it.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    /// Infix form, for display only.
    pub infix: &'static str,
    /// Declared parameter order.
    pub params: &'static [&'static str],
    pub default_args: &'static [f64],
    build: for<'a, 'b> fn(&'b ExpressionBuilder<'a>) -> &'a Node<'a>,
}

impl Sample {
    /// Build the sample's tree in `arena`.
    pub fn expression<'a>(&self, arena: &'a Bump) -> Result<Expression<'a>, Error> {
        let b = ExpressionBuilder::with_params(arena, self.params)?;
        b.build((self.build)(&b))
    }
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "canonical",
        infix: "a + b - c * d / 2 + e * 3",
        params: &["a", "b", "c", "d", "e"],
        default_args: &[1.0, 2.0, 3.0, 4.0, 5.0],
        build: canonical,
    },
    Sample {
        name: "quadratic",
        infix: "a * x * x + b * x + c",
        params: &["a", "b", "c", "x"],
        default_args: &[1.0, -3.0, 2.0, 4.0],
        build: quadratic,
    },
    Sample {
        name: "division",
        infix: "a / b",
        params: &["a", "b"],
        default_args: &[1.0, 0.0],
        build: division,
    },
];

/// Look up a sample by name.
pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|sample| sample.name == name)
}

fn canonical<'a>(b: &ExpressionBuilder<'a>) -> &'a Node<'a> {
    b.add(
        b.sub(
            b.add(b.param("a"), b.param("b")),
            b.div(b.mul(b.param("c"), b.param("d")), b.constant(2.0)),
        ),
        b.mul(b.param("e"), b.constant(3.0)),
    )
}

fn quadratic<'a>(b: &ExpressionBuilder<'a>) -> &'a Node<'a> {
    let x = || b.param("x");
    b.add(
        b.add(b.mul(b.mul(b.param("a"), x()), x()), b.mul(b.param("b"), x())),
        b.param("c"),
    )
}

fn division<'a>(b: &ExpressionBuilder<'a>) -> &'a Node<'a> {
    b.div(b.param("a"), b.param("b"))
}
