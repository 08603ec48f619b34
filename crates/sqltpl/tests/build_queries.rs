use sqltpl::{ErrorKind, QueryBuilder, Value, args, build, skip};

#[test]
fn select_with_string_argument() {
    assert_eq!(
        build(
            "SELECT * FROM table WHERE id = ?d AND name = ?",
            &args![1, "test"]
        )
        .unwrap(),
        "SELECT * FROM table WHERE id = 1 AND name = 'test'"
    );
    assert_eq!(
        build("SELECT * FROM users WHERE name = ? AND block = 0", &args!["Jack"]).unwrap(),
        "SELECT * FROM users WHERE name = 'Jack' AND block = 0"
    );
}

#[test]
fn select_field_list() {
    assert_eq!(
        build(
            "SELECT ?# FROM users WHERE user_id = ?d AND block = ?d",
            &args![vec!["name", "email"], 2, true]
        )
        .unwrap(),
        "SELECT `name`, `email` FROM users WHERE user_id = 2 AND block = 1"
    );
}

#[test]
fn update_with_map() {
    assert_eq!(
        build(
            "UPDATE users SET ?a WHERE user_id = -1",
            &args![Value::map([
                ("name", Value::from("Jack")),
                ("email", Value::Null)
            ])]
        )
        .unwrap(),
        "UPDATE users SET `name` = 'Jack', `email` = NULL WHERE user_id = -1"
    );
}

#[test]
fn optional_block_rendered_or_skipped() {
    let template = "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}";
    assert_eq!(
        build(template, &args!["user_id", vec![1, 2, 3], true]).unwrap(),
        "SELECT name FROM users WHERE `user_id` IN (1, 2, 3) AND block = 1"
    );
    assert_eq!(
        build(template, &args!["user_id", vec![1, 2, 3], skip()]).unwrap(),
        "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)"
    );
}

#[test]
fn skip_token_string_is_just_a_string() {
    // Only the real marker suppresses a block.
    assert_eq!(
        build("{ AND name = ? }", &args!["__SKIP__"]).unwrap(),
        " AND name = '__SKIP__' "
    );
}

#[test]
fn array_round_trips() {
    assert_eq!(build("?a", &args![Vec::<i64>::new()]).unwrap(), "");
    assert_eq!(build("?a", &args![vec![1, 2, 3]]).unwrap(), "1, 2, 3");
    assert_eq!(
        build(
            "?a",
            &args![Value::map([("a", Value::from(1)), ("b", Value::Null)])]
        )
        .unwrap(),
        "`a` = 1, `b` = NULL"
    );
}

#[test]
fn nesting_is_always_rejected() {
    let err = build("{ name = ?{ AND x = ?d} }", &args![skip(), 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Nesting);
    assert!(err.is_structural());
}

#[test]
fn failures_by_kind() {
    let cases: Vec<(&str, Vec<Value>, ErrorKind)> = vec![
        ("?d = ?", args![1], ErrorKind::MissingArgument),
        ("?d = ?", args![1, "test", "extra"], ErrorKind::TooManyArguments),
        ("?", args![skip()], ErrorKind::InvalidSkip),
        ("?a", args![None::<i64>], ErrorKind::NullNotAllowed),
        ("?#", args![None::<i64>], ErrorKind::NullNotAllowed),
        ("?a", args![1], ErrorKind::NotArray),
        ("?#", args![vec![Value::from("a"), Value::Null]], ErrorKind::FieldName),
        ("{ ?a }", args![vec![skip()]], ErrorKind::SkipInComposite),
        ("?", args![vec![1]], ErrorKind::UnexpectedArray),
        ("{ x", args![], ErrorKind::UnmatchedBrace),
        ("x }", args![], ErrorKind::UnmatchedBrace),
    ];

    for (template, args, kind) in cases {
        let err = build(template, &args).unwrap_err();
        assert_eq!(err.kind(), kind, "template {template:?}: {err}");
    }
}

#[test]
fn unicode_text_passes_through() {
    assert_eq!(
        build("SELECT * FROM пользователи WHERE имя = ?", &args!["Жанна д'Арк"]).unwrap(),
        "SELECT * FROM пользователи WHERE имя = 'Жанна д\\'Арк'"
    );
}

#[test]
fn ansi_builder_for_postgres_style_sql() {
    let qb = QueryBuilder::new(sqltpl::Dialect::Ansi);
    assert_eq!(
        qb.build(
            "SELECT ?# FROM \"users\" WHERE name = ?{ AND age > ?d}",
            &args![vec!["id", "name"], "O'Hara", qb.skip()]
        )
        .unwrap(),
        "SELECT \"id\", \"name\" FROM \"users\" WHERE name = 'O''Hara'"
    );
}
