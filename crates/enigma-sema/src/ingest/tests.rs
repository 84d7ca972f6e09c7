use super::*;
use enigma_frontend::{EnumScoping, OperationBuilder, ProgramBuilder, RecordBuilder};
use enigma_identity::UnderlyingType;

fn check(builder: ProgramBuilder) -> Result<Model, Vec<TypeError>> {
    let (program, interner) = builder.build();
    ingest(&program, &interner)
}

fn errors(builder: ProgramBuilder) -> Vec<SemanticError> {
    match check(builder) {
        Ok(_) => panic!("expected ingest to fail"),
        Err(errors) => errors.into_iter().map(|e| e.error).collect(),
    }
}

/// The header fixture: two enums, an abstract base and a concrete subclass.
fn fixture() -> ProgramBuilder {
    let mut builder = ProgramBuilder::new();
    builder
        .add_enum(
            "EnumClass",
            EnumScoping::Scoped,
            Some(UnderlyingType::I8),
            &["EC_First", "EC_Second"],
        )
        .add_enum("EnumSimple", EnumScoping::Unscoped, None, &["ES_First", "ES_Second"])
        .add_record(
            RecordBuilder::class("Test")
                .operation(OperationBuilder::new("DoTest", "() const"))
                .operation(OperationBuilder::new("PureVirtual", "()").pure()),
        )
        .add_record(
            RecordBuilder::class("SubTest")
                .base("Test")
                .operation(OperationBuilder::new("PureVirtual", "()").virtual_()),
        );
    builder
}

#[test]
fn fixture_ingests_cleanly() {
    let model = check(fixture()).unwrap();
    assert_eq!(model.enums().len(), 2);
    assert_eq!(model.graph().len(), 2);
    assert!(model.warnings().is_empty());
}

#[test]
fn scoped_enum_keeps_explicit_storage() {
    let model = check(fixture()).unwrap();
    let info = model.enum_by_name("EnumClass").unwrap();
    assert!(info.is_scoped());
    assert_eq!(info.underlying_type, UnderlyingType::I8);
    assert_eq!(info.underlying_type.size_bytes(), 1);
    assert!(info.underlying_type.is_signed());

    let simple = model.enum_by_name("EnumSimple").unwrap();
    assert!(!simple.is_scoped());
    assert_eq!(simple.underlying_type, UnderlyingType::I32);
}

#[test]
fn duplicate_enumerator_is_rejected() {
    let mut builder = ProgramBuilder::new();
    builder.add_enum("Color", EnumScoping::Scoped, None, &["Red", "Green", "Red"]);
    let errors = errors(builder);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        SemanticError::DuplicateEnumerator { ref enumerator, .. } if enumerator == "Red"
    ));
}

#[test]
fn duplicate_top_level_name_is_rejected() {
    let mut builder = ProgramBuilder::new();
    builder
        .add_record(RecordBuilder::class("Test"))
        .add_enum("Test", EnumScoping::Scoped, None, &["A"]);
    let errors = errors(builder);
    assert!(matches!(
        errors[0],
        SemanticError::DuplicateDeclaration { ref name, .. } if name == "Test"
    ));
}

#[test]
fn unscoped_enumerator_collides_with_enclosing_scope() {
    let mut builder = ProgramBuilder::new();
    builder
        .add_enum("First", EnumScoping::Unscoped, None, &["Shared"])
        .add_enum("Second", EnumScoping::Unscoped, None, &["Shared"]);
    let errors = errors(builder);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        SemanticError::DuplicateDeclaration { ref name, .. } if name == "Shared"
    ));
}

#[test]
fn scoped_enumerators_do_not_leak() {
    let mut builder = ProgramBuilder::new();
    builder
        .add_enum("First", EnumScoping::Scoped, None, &["Shared"])
        .add_enum("Second", EnumScoping::Scoped, None, &["Shared"])
        .add_record(RecordBuilder::structure("Shared2"));
    assert!(check(builder).is_ok());
}

#[test]
fn duplicate_members_are_rejected() {
    let mut builder = ProgramBuilder::new();
    builder.add_record(
        RecordBuilder::class("Widget")
            .field("size", "int")
            .field("size", "long")
            .operation(OperationBuilder::new("Draw", "()"))
            .operation(OperationBuilder::new("Draw", "( )")),
    );
    let errors = errors(builder);
    let names: Vec<&str> = errors
        .iter()
        .filter_map(|e| match e {
            SemanticError::DuplicateDeclaration { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["Widget::size", "Widget::Draw()"]);
}

#[test]
fn overloads_are_distinct_operations() {
    let mut builder = ProgramBuilder::new();
    builder.add_record(
        RecordBuilder::class("Widget")
            .operation(OperationBuilder::new("Draw", "()"))
            .operation(OperationBuilder::new("Draw", "() const")),
    );
    assert!(check(builder).is_ok());
}

#[test]
fn record_without_pure_operations_is_concrete() {
    let mut builder = ProgramBuilder::new();
    builder.add_record(
        RecordBuilder::structure("Point")
            .field("x", "int")
            .field("y", "int"),
    );
    let model = check(builder).unwrap();
    let point = model.record_by_name("Point").unwrap();
    let result = model.resolve(point).unwrap();
    assert!(result.concrete);
    assert!(result.unresolved.is_empty());
}

#[test]
fn base_with_pure_operation_is_abstract() {
    let model = check(fixture()).unwrap();
    let test = model.record_by_name("Test").unwrap();
    let result = model.resolve(test).unwrap();
    assert!(!result.concrete);
    assert_eq!(result.describe_unresolved(model.interner()), "PureVirtual()");
}

#[test]
fn derived_resolution_leaves_base_unchanged() {
    let model = check(fixture()).unwrap();
    let sub = model.record_by_name("SubTest").unwrap();
    let test = model.record_by_name("Test").unwrap();

    let derived = model.resolve(sub).unwrap();
    assert!(derived.concrete);
    assert!(derived.unresolved.is_empty());
    assert!(!model.resolve(test).unwrap().concrete);
}

#[test]
fn unknown_base_is_rejected() {
    let mut builder = ProgramBuilder::new();
    builder.add_record(RecordBuilder::class("Derived").base("Missing"));
    let errors = errors(builder);
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        SemanticError::UnknownBase { record, base, .. } => {
            assert_eq!(record, "Derived");
            assert_eq!(base, "Missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn multiple_bases_are_rejected() {
    let mut builder = ProgramBuilder::new();
    builder
        .add_record(RecordBuilder::class("A"))
        .add_record(RecordBuilder::class("B"))
        .add_record(RecordBuilder::class("C").base("A").base("B"));
    let errors = errors(builder);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        SemanticError::MultipleInheritanceUnsupported { ref record, .. } if record == "C"
    ));
}

#[test]
fn two_level_chain_ancestors() {
    let model = check(fixture()).unwrap();
    let sub = model.record_by_name("SubTest").unwrap();
    let test = model.record_by_name("Test").unwrap();
    assert_eq!(model.ancestors(sub).collect::<Vec<_>>(), vec![test]);
    assert_eq!(model.base_of(test), None);
}

#[test]
fn cycle_is_reported_at_resolution() {
    let mut builder = ProgramBuilder::new();
    builder
        .add_record(RecordBuilder::class("A").base("B"))
        .add_record(RecordBuilder::class("B").base("A"));
    let model = check(builder).unwrap();
    let a = model.record_by_name("A").unwrap();
    assert!(matches!(
        model.resolve(a),
        Err(SemanticError::CyclicInheritance { .. })
    ));
    assert_eq!(model.ancestors(a).count(), 1);
}

#[test]
fn errors_are_collected_together() {
    let mut builder = ProgramBuilder::new();
    builder
        .add_enum("Color", EnumScoping::Scoped, None, &["Red", "Red"])
        .add_record(RecordBuilder::class("Derived").base("Missing"))
        .add_record(RecordBuilder::class("Derived"));
    let errors = errors(builder);
    assert_eq!(errors.len(), 3);
}

#[test]
fn override_without_target_warns() {
    let mut builder = ProgramBuilder::new();
    builder
        .add_record(RecordBuilder::class("Base").operation(OperationBuilder::new("Run", "()")))
        .add_record(
            RecordBuilder::class("Derived")
                .base("Base")
                .operation(OperationBuilder::new("Run", "()").override_()),
        );
    let model = check(builder).unwrap();
    assert_eq!(model.warnings().len(), 1);
    assert!(matches!(
        model.warnings()[0].warning,
        SemanticWarning::OverrideWithoutTarget { ref operation, .. } if operation == "Run()"
    ));
}

#[test]
fn override_of_virtual_is_silent() {
    let mut builder = ProgramBuilder::new();
    builder
        .add_record(RecordBuilder::class("Base").operation(OperationBuilder::new("Run", "()").pure()))
        .add_record(
            RecordBuilder::class("Derived")
                .base("Base")
                .operation(OperationBuilder::new("Run", "()").override_()),
        );
    let model = check(builder).unwrap();
    assert!(model.warnings().is_empty());
}

#[test]
fn declaration_order_is_preserved() {
    let mut builder = ProgramBuilder::new();
    builder.add_record(
        RecordBuilder::class("Ordered")
            .operation(OperationBuilder::new("Zeta", "()"))
            .operation(OperationBuilder::new("Alpha", "()"))
            .field("second", "int")
            .field("first", "int"),
    );
    let model = check(builder).unwrap();
    let id = model.record_by_name("Ordered").unwrap();
    let interner = model.interner();
    let ops: Vec<&str> = model
        .graph()
        .operations_of(id)
        .map(|op| interner.resolve(op.signature.name))
        .collect();
    let fields: Vec<&str> = model
        .graph()
        .fields_of(id)
        .map(|f| interner.resolve(f.name))
        .collect();
    assert_eq!(ops, vec!["Zeta", "Alpha"]);
    assert_eq!(fields, vec!["second", "first"]);
}
