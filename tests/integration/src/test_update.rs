//! End-to-end update statement compilation scenarios.

#[cfg(test)]
mod tests {
    use docstack_expression::{
        Condition, ExpressionError, Operand, Path, SetValue, Update, UpdateAction, compile_update,
    };
    use docstack_model::AttributeValue;

    use crate::init_tracing;

    #[test]
    fn test_should_compile_full_four_clause_statement() {
        init_tracing();

        let update = Update::new()
            .add(Path::new("loginCount"), 1_i64)
            .unwrap()
            .set(Path::new("lastLogin"), "2026-08-06T00:00:00Z")
            .remove(Path::new("passwordResetToken"))
            .delete(
                Path::new("pendingInvites"),
                AttributeValue::Ss(vec!["bob".to_owned()]),
            )
            .unwrap();
        let compiled = compile_update(&update, None).unwrap();

        assert_eq!(
            compiled.update_expression,
            "SET #attr2 = :value2\n\
             REMOVE #attr3\n\
             ADD #attr1 :value1\n\
             DELETE #attr4 :value3"
        );
        assert!(compiled.condition_expression.is_none());
    }

    #[test]
    fn test_should_compile_guarded_counter_increment() {
        init_tracing();

        let update = Update::new().set(
            Path::new("count"),
            SetValue::from(Operand::from(Path::new("count"))).plus(1_i64),
        );
        let condition = Condition::less_than(Path::new("count"), 100_i64).unwrap();
        let compiled = compile_update(&update, Some(&condition)).unwrap();

        assert_eq!(compiled.update_expression, "SET #attr1 = #attr1 + :value1");
        assert_eq!(
            compiled.condition_expression.as_deref(),
            Some("#attr1 < :value2")
        );

        let names = compiled.names.unwrap();
        assert_eq!(names.len(), 1);

        let values = compiled.values.unwrap();
        assert_eq!(values.get(":value1"), Some(&AttributeValue::N("1".into())));
        assert_eq!(values.get(":value2"), Some(&AttributeValue::N("100".into())));
    }

    #[test]
    fn test_should_compile_if_not_exists_fallback() {
        init_tracing();

        let update = Update::new().set(
            Path::new("views"),
            SetValue::if_not_exists(Path::new("views"), 0_i64).plus(1_i64),
        );
        let compiled = compile_update(&update, None).unwrap();

        assert_eq!(
            compiled.update_expression,
            "SET #attr1 = if_not_exists(#attr1, :value1) + :value2"
        );
    }

    #[test]
    fn test_should_compile_list_append_rotation() {
        init_tracing();

        let update = Update::new().set(
            Path::new("history"),
            SetValue::list_append(
                Path::new("history"),
                AttributeValue::L(vec![AttributeValue::from("deployed")]),
            ),
        );
        let compiled = compile_update(&update, None).unwrap();

        assert_eq!(
            compiled.update_expression,
            "SET #attr1 = list_append(#attr1, :value1)"
        );
    }

    #[test]
    fn test_should_give_distinct_tokens_to_equal_set_literals() {
        init_tracing();

        // Two structurally equal sets supplied separately stay separate on
        // the wire.
        let update = Update::new()
            .add(Path::new("a"), AttributeValue::Ss(vec!["x".to_owned()]))
            .unwrap()
            .delete(Path::new("b"), AttributeValue::Ss(vec!["x".to_owned()]))
            .unwrap();
        let compiled = compile_update(&update, None).unwrap();

        assert_eq!(
            compiled.update_expression,
            "ADD #attr1 :value1\nDELETE #attr2 :value2"
        );
        assert_eq!(compiled.values.unwrap().len(), 2);
    }

    #[test]
    fn test_should_never_emit_absent_clauses() {
        init_tracing();

        let update = Update::new()
            .set(Path::new("a"), 1_i64)
            .add(Path::new("b"), 2_i64)
            .unwrap();
        let compiled = compile_update(&update, None).unwrap();

        assert!(!compiled.update_expression.contains("REMOVE"));
        assert!(!compiled.update_expression.contains("DELETE"));
        assert_eq!(
            compiled.update_expression,
            "SET #attr1 = :value1\nADD #attr2 :value2"
        );
    }

    #[test]
    fn test_should_reject_empty_action_list() {
        init_tracing();

        let err = compile_update(&Update::from(vec![]), None).unwrap_err();
        assert!(matches!(err, ExpressionError::EmptyUpdate));
    }

    #[test]
    fn test_should_reject_add_with_plain_string() {
        init_tracing();

        let err = UpdateAction::add(Path::new("a"), "not a number").unwrap_err();
        assert!(matches!(err, ExpressionError::OperandType { .. }));
    }

    #[test]
    fn test_should_serialize_update_value_table_in_wire_format() -> anyhow::Result<()> {
        init_tracing();

        let update = Update::new()
            .add(
                Path::new("scores"),
                AttributeValue::Ns(vec!["5".to_owned()]),
            )
            .unwrap();
        let compiled = compile_update(&update, None)?;

        let json = serde_json::to_string(&compiled.values.unwrap())?;
        assert_eq!(json, r#"{":value1":{"NS":["5"]}}"#);
        Ok(())
    }
}
