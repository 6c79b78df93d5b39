use once_cell::sync::Lazy;

/// Expected behaviour of one built-in sample on one argument vector.
pub struct TestCase {
    pub sample: &'static str,
    pub prefix: &'static str,
    pub listing: &'static [&'static str],
    pub args: &'static [f64],
    pub result: f64,
}

pub static TEST_CASES: Lazy<Vec<TestCase>> = Lazy::new(|| {
    vec![
        TestCase {
            sample: "canonical",
            prefix: "add(sub(add(a, b), div(mul(c, d), 2)), mul(e, 3))",
            listing: &[
                "ldarg 0", "ldarg 1", "add", "ldarg 2", "ldarg 3", "mul", "ldc 2", "div", "sub",
                "ldarg 4", "ldc 3", "mul", "add",
            ],
            args: &[1.0, 2.0, 3.0, 4.0, 5.0],
            result: 12.0,
        },
        TestCase {
            sample: "quadratic",
            prefix: "add(add(mul(mul(a, x), x), mul(b, x)), c)",
            listing: &[
                "ldarg 0", "ldarg 3", "mul", "ldarg 3", "mul", "ldarg 1", "ldarg 3", "mul", "add",
                "ldarg 2", "add",
            ],
            args: &[1.0, -3.0, 2.0, 4.0],
            result: 6.0,
        },
        TestCase {
            sample: "division",
            prefix: "div(a, b)",
            listing: &["ldarg 0", "ldarg 1", "div"],
            args: &[1.0, 4.0],
            result: 0.25,
        },
        TestCase {
            sample: "division",
            prefix: "div(a, b)",
            listing: &["ldarg 0", "ldarg 1", "div"],
            args: &[-1.0, 0.0],
            result: f64::NEG_INFINITY,
        },
    ]
});
