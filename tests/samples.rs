mod cases;

use arith::{Backend, CompilationOptions, Engine, compiler::BytecodeCompiler, evaluator, samples};
use bumpalo::Bump;
use cases::TEST_CASES;
use pretty_assertions::assert_eq;

fn available_backends() -> Vec<Backend> {
    [Backend::Interpreter, Backend::Native]
        .into_iter()
        .filter(|backend| backend.is_available())
        .collect()
}

#[test]
fn test_prefix_rendering() {
    for case in TEST_CASES.iter() {
        let arena = Bump::new();
        let sample = samples::find(case.sample).unwrap();
        let expr = sample.expression(&arena).unwrap();
        assert_eq!(expr.to_string(), case.prefix, "sample {}", case.sample);
    }
}

#[test]
fn test_bytecode_listing() {
    for case in TEST_CASES.iter() {
        let arena = Bump::new();
        let expr = samples::find(case.sample).unwrap().expression(&arena).unwrap();
        let code = BytecodeCompiler::compile(&expr).unwrap();

        let listing: Vec<String> = code.instructions().iter().map(|i| i.to_string()).collect();
        assert_eq!(listing, case.listing, "sample {}", case.sample);
        assert_eq!(code.stack_depths().last(), Some(&1));
    }
}

#[test]
fn test_results_on_every_backend() {
    let engine = Engine::default();
    for case in TEST_CASES.iter() {
        let arena = Bump::new();
        let expr = samples::find(case.sample).unwrap().expression(&arena).unwrap();
        assert_eq!(evaluator::evaluate(&expr, case.args).unwrap(), case.result);

        for backend in available_backends() {
            let function = engine
                .compile_with(&expr, &CompilationOptions { backend })
                .unwrap();
            assert_eq!(
                function.call(case.args).unwrap(),
                case.result,
                "sample {} on {backend}",
                case.sample
            );
        }
    }
}

#[test]
fn test_default_args_match_arity() {
    for sample in samples::SAMPLES {
        let arena = Bump::new();
        let expr = sample.expression(&arena).unwrap();
        assert_eq!(expr.params(), sample.params);
        assert_eq!(expr.arity(), sample.default_args.len());
    }
}

#[test]
fn test_unknown_sample() {
    assert!(samples::find("cubic").is_none());
}
