use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rechner_rs::ast::{ASTNode, Bindings, Compiler, Lexer, Number, Operator, Parser, Token};
use rechner_rs::error::{Error, EvaluationError, ParseError};

const NAMES: [&str; 4] = ["a", "b", "price", "_x1"];
const OPERATORS: [Operator; 4] = [
    Operator::Add,
    Operator::Subtract,
    Operator::Multiply,
    Operator::Divide,
];

fn bindings<const N: usize>(values: [(&str, Number); N]) -> Bindings {
    values
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn random_tree(rng: &mut StdRng, depth: u32) -> ASTNode {
    if depth == 0 || rng.random_bool(0.3) {
        return match rng.random_range(0..3) {
            0 => ASTNode::constant(rng.random_range(-20i64..100)),
            1 => ASTNode::constant(rng.random_range(1..40) as f64 / 4.0),
            _ => ASTNode::reference(NAMES[rng.random_range(0..NAMES.len())]),
        };
    }
    let operator = OPERATORS[rng.random_range(0..OPERATORS.len())];
    ASTNode::operation(
        random_tree(rng, depth - 1),
        operator,
        random_tree(rng, depth - 1),
    )
}

fn same_outcome(
    left: &Result<Number, EvaluationError>,
    right: &Result<Number, EvaluationError>,
) -> bool {
    match (left, right) {
        (Ok(a), Ok(b)) => a == b || (a.as_f64().is_nan() && b.as_f64().is_nan()),
        (a, b) => a == b,
    }
}

#[test]
fn test_literals_lex_to_a_single_number() {
    for n in [0i64, 7, 42, 123456789, i64::MAX] {
        assert_eq!(
            Lexer::lex(&n.to_string()).unwrap(),
            vec![Token::Number(Number::Integer(n)), Token::End]
        );
    }
    for x in [0.5, 2.0, 1234.125] {
        let text = Number::Float(x).to_string();
        assert_eq!(
            Lexer::lex(&text).unwrap(),
            vec![Token::Number(Number::Float(x)), Token::End]
        );
    }
}

#[test]
fn test_whitespace_does_not_change_tokens() {
    let dense = Lexer::lex("1+2*(a-b)/c").unwrap();
    let spaced = Lexer::lex("  1 +\t2 *\n( a -  b ) /   c  ").unwrap();
    assert_eq!(dense, spaced);
}

#[test]
fn test_precedence_and_associativity() {
    let empty = Bindings::new();
    assert_eq!(rechner_rs::calculate("1 + 2 * 3", &empty).unwrap(), Number::Integer(7));
    assert_eq!(rechner_rs::calculate("(1 + 2) * 3", &empty).unwrap(), Number::Integer(9));
    assert_eq!(rechner_rs::calculate("10 - 2 - 3", &empty).unwrap(), Number::Integer(5));
}

#[test]
fn test_unary_minus() {
    assert_eq!(
        rechner_rs::calculate("-5", &Bindings::new()).unwrap(),
        Number::Integer(-5)
    );

    let ast = rechner_rs::parse("-a").unwrap();
    assert_eq!(
        ast,
        ASTNode::operation(ASTNode::constant(-1), Operator::Multiply, ASTNode::reference("a"))
    );
    assert_eq!(
        ast.calculate(&bindings([("a", 3.into())])).unwrap(),
        Number::Integer(-3)
    );
}

#[test]
fn test_references_are_unique_and_ordered() {
    let ast = rechner_rs::parse("a + b*a + 4").unwrap();
    assert_eq!(ast.references(), vec!["a", "b"]);
}

#[test]
fn test_missing_binding_is_named() {
    let error = rechner_rs::calculate("a + b", &bindings([("a", 1.into())])).unwrap_err();
    assert_eq!(
        error,
        Error::Evaluation(EvaluationError::Unbound("b".to_string()))
    );
    assert!(error.to_string().contains("\"b\""));
}

#[test]
fn test_malformed_expressions() {
    assert!(matches!(
        rechner_rs::parse("(a + (b * c)"),
        Err(Error::Parse(ParseError::MissingClosingParenthesis { .. }))
    ));
    assert!(matches!(
        rechner_rs::parse("a + b a"),
        Err(Error::Parse(ParseError::TrailingTokens { .. }))
    ));
}

#[test]
fn test_compiled_expression_is_reusable() {
    let compiled = rechner_rs::compile("1 + 2*a").unwrap();
    assert_eq!(
        compiled.invoke(&bindings([("a", 3.into())])).unwrap(),
        Number::Integer(7)
    );
    assert_eq!(
        compiled.invoke(&bindings([("a", 5.into())])).unwrap(),
        Number::Integer(11)
    );
}

#[test]
fn test_random_trees_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let tree = random_tree(&mut rng, 5);
        let rendered = tree.to_string();
        let reparsed = Parser::parse_str(&rendered).unwrap();
        assert_eq!(reparsed, tree, "{rendered}");
        assert_eq!(reparsed.to_string(), rendered);
    }
}

#[test]
fn test_random_trees_compile_like_they_evaluate() {
    let mut rng = StdRng::seed_from_u64(42);
    let context = bindings([
        ("a", 3.into()),
        ("b", 0.into()),
        ("price", 2.5.into()),
        ("_x1", (-7).into()),
    ]);
    let folding = Compiler::new();
    let plain = Compiler::new().with_constant_folding(false);

    for _ in 0..500 {
        let tree = random_tree(&mut rng, 4);
        let expected = tree.calculate(&context);
        let folded = folding.compile(&tree).invoke(&context);
        let unfolded = plain.compile(&tree).invoke(&context);
        assert!(same_outcome(&expected, &folded), "{tree}: {expected:?} vs {folded:?}");
        assert!(same_outcome(&expected, &unfolded), "{tree}: {expected:?} vs {unfolded:?}");
    }
}
