use qsim::core::ast::{Gate, Instruction, MatrixRef, Register, Tensor, Variable};
use qsim::core::parser::{parse_line, parse_line_with_diagnostics};

#[test]
fn initialize_without_value() {
    assert_eq!(parse_line("INITIALIZE R0").unwrap(), Instruction::initialize(0, None));
}

#[test]
fn initialize_with_bitstring() {
    assert_eq!(
        parse_line("INITIALIZE R0 [101100010]").unwrap(),
        Instruction::initialize(0, Some("101100010"))
    );
}

#[test]
fn select() {
    assert_eq!(parse_line("SELECT V1 R0 0 9").unwrap(), Instruction::select("V1", 0, 0, 9));
}

#[test]
fn assignment_forms() {
    assert_eq!(
        parse_line("T TENSOR H R2").unwrap(),
        Instruction::Tensor(Tensor {
            variable: Variable("T".into()),
            left: MatrixRef::Gate(Gate::H),
            right: MatrixRef::Register(Register(2)),
        })
    );
}

#[test]
fn display_forms() {
    insta::assert_snapshot!(parse_line("INITIALIZE R0 [101]").unwrap().to_string(), @"Initialize R[0] with value '101'");
    insta::assert_snapshot!(parse_line("INITIALIZE R7").unwrap().to_string(), @"Initialize R[7]");
    insta::assert_snapshot!(parse_line("SELECT V1 R0 0 9").unwrap().to_string(), @"Select 9 elements of R[0] from 0 into Var[V1]");
    insta::assert_snapshot!(parse_line("APPLY CNOT R1").unwrap().to_string(), @"Apply CNOT to R[1]");
    insta::assert_snapshot!(parse_line("X CONCAT I2 Y").unwrap().to_string(), @"Concat I2 and Var[Y] into Var[X]");
    insta::assert_snapshot!(parse_line("X TENSOR R0 H").unwrap().to_string(), @"Tensor R[0] with H into Var[X]");
    insta::assert_snapshot!(parse_line("MEASURE R3 out").unwrap().to_string(), @"Measure R[3] into Var[out]");
    insta::assert_snapshot!(parse_line("INV INVERSE CNOT").unwrap().to_string(), @"Invert CNOT into Var[INV]");
}

#[test]
fn missing_operand_points_at_end_of_input() {
    let err = parse_line("SELECT V1 R0 0").unwrap_err();
    assert_eq!(err.message, "Expected element count, found end of input");
    assert_eq!((err.line, err.column), (1, 15));
}

#[test]
fn trailing_tokens_are_rejected() {
    let err = parse_line("INITIALIZE R0 R1").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected REGISTER after instruction at 1:15");
}

#[test]
fn wrong_operand_kind() {
    let err = parse_line("APPLY 3 R0").unwrap_err();
    assert_eq!(err.message, "Expected a gate, variable or register");
    assert_eq!(err.column, 7);

    let err = parse_line("V1 R0").unwrap_err();
    assert_eq!(err.message, "Expected CONCAT, TENSOR or INVERSE after variable");

    assert!(parse_line("").is_err());
    assert!(parse_line("R0").is_err());
}

#[test]
fn lexer_diagnostics_travel_with_the_result() {
    let (parsed, diags) = parse_line_with_diagnostics("MEASURE R0 ? m");
    assert_eq!(parsed.unwrap(), parse_line("MEASURE R0 m").unwrap());
    assert_eq!(diags.len(), 1);
}

#[test]
fn gate_literals_materialize() {
    let h = Gate::H.matrix().unwrap();
    assert_eq!(h.shape(), (2, 2));
    assert_eq!(h[(1, 1)], -h[(0, 0)]);
    assert_eq!(Gate::Cnot.matrix().unwrap().shape(), (4, 4));
    assert_eq!(Gate::Identity(3).matrix().unwrap(), qsim::ComplexMatrix::identity_of_size(3).unwrap());
    assert!(Gate::Identity(0).matrix().is_err());
}
