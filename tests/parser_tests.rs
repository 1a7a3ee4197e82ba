use cplusminus::ast::{
    BinaryOp, BinaryOperation, Node, NumberLiteral, PrimitiveType, Program, StringLiteral,
    UnaryOp, UnaryOperation, VariableDeclaration,
};
use cplusminus::{parse, parse_program, tokenize, Error, ParseError, TokenKind};

fn var(ty: PrimitiveType, name: &str) -> Node {
    Node::VariableDeclaration(VariableDeclaration {
        ty,
        name: name.to_string(),
    })
}

fn int(text: &str) -> Node {
    Node::NumberLiteral(NumberLiteral {
        is_float: false,
        text: text.to_string(),
    })
}

fn float(text: &str) -> Node {
    Node::NumberLiteral(NumberLiteral {
        is_float: true,
        text: text.to_string(),
    })
}

fn assign(target: Node, value: Node) -> Node {
    Node::BinaryOperation(BinaryOperation {
        op: BinaryOp::Assign,
        left: Box::new(target),
        right: Box::new(value),
    })
}

fn print(operand: Node) -> Node {
    Node::UnaryOperation(UnaryOperation {
        op: UnaryOp::Print,
        operand: Box::new(operand),
    })
}

fn parse_err(src: &str) -> ParseError {
    match parse_program(src) {
        Err(Error::Parse(e)) => e,
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn parse_bare_declaration() {
    let p = parse_program("int32 a;").unwrap();
    assert_eq!(
        p,
        Program {
            stmts: vec![var(PrimitiveType::Int32, "a")]
        }
    );
}

#[test]
fn declaration_with_initializer_is_one_statement() {
    let p = parse_program("float32 b = 2.5;").unwrap();
    assert_eq!(
        p.stmts,
        vec![assign(var(PrimitiveType::Float32, "b"), float("2.5"))]
    );
}

#[test]
fn declare_then_assign() {
    let p = parse_program("int32 a; a = 5;").unwrap();
    assert_eq!(
        p.stmts,
        vec![
            var(PrimitiveType::Int32, "a"),
            assign(var(PrimitiveType::Int32, "a"), int("5")),
        ]
    );
}

#[test]
fn round_trip_program_statements() {
    let p = parse_program("int32 a = 1;\nfloat32 b = 2.5;\nprint(a);\n").unwrap();
    assert_eq!(
        p.stmts,
        vec![
            assign(var(PrimitiveType::Int32, "a"), int("1")),
            assign(var(PrimitiveType::Float32, "b"), float("2.5")),
            print(var(PrimitiveType::Int32, "a")),
        ]
    );
}

#[test]
fn print_string_and_char() {
    let p = parse_program("print(\"hi\"); char c = 'x'; print(c); print('y');").unwrap();
    assert_eq!(
        p.stmts,
        vec![
            print(Node::StringLiteral(StringLiteral {
                is_char: false,
                text: "\"hi\"".into(),
            })),
            assign(
                var(PrimitiveType::Char, "c"),
                Node::StringLiteral(StringLiteral {
                    is_char: true,
                    text: "'x'".into(),
                })
            ),
            print(var(PrimitiveType::Char, "c")),
            print(Node::StringLiteral(StringLiteral {
                is_char: true,
                text: "'y'".into(),
            })),
        ]
    );
}

#[test]
fn reference_carries_declared_type() {
    let p = parse_program("float32 f; int32 i; f = i;").unwrap();
    assert_eq!(
        p.stmts[2],
        assign(var(PrimitiveType::Float32, "f"), var(PrimitiveType::Int32, "i"))
    );
}

#[test]
fn redeclaration_keeps_first_type() {
    let p = parse_program("int32 a; float32 a; a = 1;").unwrap();
    assert_eq!(p.stmts.len(), 3);
    assert_eq!(p.stmts[1], var(PrimitiveType::Float32, "a"));
    assert_eq!(p.stmts[2], assign(var(PrimitiveType::Int32, "a"), int("1")));
}

#[test]
fn empty_program() {
    assert_eq!(parse_program("").unwrap(), Program::default());
}

#[test]
fn parse_from_tokens_directly() {
    let tokens = tokenize("int32 x = 1;").unwrap();
    let p = parse(&tokens).unwrap();
    assert_eq!(p.stmts, vec![assign(var(PrimitiveType::Int32, "x"), int("1"))]);
}

#[test]
fn error_undeclared_identifier() {
    let err = parse_err("int32 a = b;");
    match err {
        ParseError::UndeclaredIdentifier { name, span } => {
            assert_eq!(name, "b");
            assert_eq!((span.line, span.col), (1, 11));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn error_assignment_before_declaration() {
    let err = parse_err("a = 1; int32 a;");
    assert!(matches!(err, ParseError::UndeclaredIdentifier { ref name, .. } if name == "a"));
}

#[test]
fn error_initializer_references_itself() {
    let err = parse_err("int32 a = a + 1;");
    assert!(matches!(err, ParseError::UndeclaredIdentifier { ref name, .. } if name == "a"));
}

#[test]
fn error_missing_semicolon_at_eof() {
    let err = parse_err("int32 a = 1");
    assert_eq!(
        err,
        ParseError::TokensExhausted {
            expected: vec![TokenKind::Semicolon]
        }
    );
}

#[test]
fn error_missing_semicolon_between_statements() {
    let err = parse_err("int32 a = 1 int32 b;");
    match err {
        ParseError::UnexpectedToken {
            expected,
            actual,
            text,
            span,
        } => {
            assert_eq!(expected, vec![TokenKind::Semicolon]);
            assert_eq!(actual, TokenKind::Int32);
            assert_eq!(text, "int32");
            assert_eq!((span.line, span.col), (1, 13));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn error_void_is_not_a_variable_type() {
    let err = parse_err("void v;");
    match err {
        ParseError::UnexpectedToken {
            expected, actual, ..
        } => {
            assert_eq!(actual, TokenKind::Void);
            assert!(expected.contains(&TokenKind::Int32));
            assert!(expected.contains(&TokenKind::Print));
            assert!(!expected.contains(&TokenKind::Void));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn error_string_outside_print() {
    let err = parse_err("int32 a = \"x\";");
    assert!(matches!(
        err,
        ParseError::UnexpectedToken {
            actual: TokenKind::StringValue,
            ..
        }
    ));
}

#[test]
fn error_print_missing_rparen() {
    let err = parse_err("print(\"a\";");
    assert!(matches!(
        err,
        ParseError::UnexpectedToken {
            actual: TokenKind::Semicolon,
            ..
        }
    ));
}

#[test]
fn only_first_error_is_reported() {
    let err = parse_err("int32 a = ;\nint32 b = ;\n");
    match err {
        ParseError::UnexpectedToken { actual, span, .. } => {
            assert_eq!(actual, TokenKind::Semicolon);
            assert_eq!((span.line, span.col), (1, 11));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn error_messages() {
    assert_eq!(
        parse_err("int32 a = b;").to_string(),
        "undeclared identifier `b` on line 1 at column 11"
    );
    assert_eq!(
        parse_err("int32 a").to_string(),
        "expected `;`, but all tokens have already been processed"
    );
    assert_eq!(
        parse_err("int32 a = 1)").to_string(),
        "expected `;`, found `)` on line 1 at column 12"
    );
}
