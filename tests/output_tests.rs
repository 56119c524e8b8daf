use cql_lang::{
    BoolClause, Clause, Modifier, Operator, Parser, Prefix, Query, SearchClause, Sort, parse,
    quote,
};

fn canonical(input: &str) -> String {
    parse(input, false)
        .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", input, e))
        .to_string()
}

fn term(term: &str) -> Clause {
    SearchClause {
        term: term.to_string(),
        ..SearchClause::default()
    }
    .into()
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_full_query_round_trip() {
    let input = "> dc = \"http://deepcustard.org/\" > \"\" dc.title any/\"\" \"\" or (dc.creator =/x=y sanderson and dc.identifier = id:1234567) sortBy dc.date/sort.descending/special=1 dc.title/sort.ascending";
    assert_eq!(canonical(input), input);
}

#[test]
fn test_canonical_output_is_stable() {
    let test_cases = vec![
        "myterm",
        "a b c",
        "dc.title any/relevant (fish or frog)",
        "(a = x or a = y) and (b = z or b = q)",
        "a or (> b = x a b.c d)",
        "title = \"a\\\"b\" and x = \"say \\\"hi\\\"\"",
        "x sortby a/sort.locale=\"en US\" b",
        "> x a b c or d",
        "(a prox/unit=word/distance>2 (b))",
        "year within \"1990 2000\" not title =/cql.word \"\"",
        "cql.allRecords = 1",
    ];

    for input in test_cases {
        let once = canonical(input);
        assert_eq!(canonical(&once), once, "Not stable for input: {}", input);
    }
}

#[test]
fn test_default_elision() {
    let test_cases = vec![
        ("myterm", "myterm"),
        ("cql.serverChoice = myterm", "myterm"),
        ("cql.serverChoice scr myterm", "myterm"),
        ("cql.serverChoice any myterm", "cql.serverChoice any myterm"),
        ("cql.serverChoice =/cql.word myterm", "cql.serverChoice =/cql.word myterm"),
        ("sortby", "sortby"),
        ("sortby sortby", "sortby"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(canonical(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_multi_word_terms_are_quoted() {
    let test_cases = vec![
        ("a b", "\"a b\""),
        ("a b c", "\"a b c\""),
        ("a b.c", "\"a b.c\""),
        ("a b.c d", "\"a b.c d\""),
        ("a b adj", "\"a b adj\""),
        ("a b adj adj", "\"a b adj adj\""),
        ("1 2.5 6", "\"1 2.5 6\""),
        ("> b = x a b.c d", "> b = x a b.c d"),
        ("a b.c d or (> b = x a b.c d)", "\"a b.c d\" or (> b = x a b.c d)"),
        ("a within d", "a within d"),
        ("> x a b c", "> x a b c"),
        ("a b c or (> x a b c)", "\"a b c\" or (> x a b c)"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(canonical(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_bound_prefix_needs_term() {
    let err = parse("> b = x a b.c", false).unwrap_err();
    assert_eq!(err.message(), "search term expected");
    assert_eq!(err.position(), 13);
}

// ============================================================================
// Brackets
// ============================================================================

#[test]
fn test_query_brackets() {
    let test_cases = vec![
        ("a = x and b = y or c = z", "a = x and b = y or c = z"),
        ("a = x and (b = y or c = z)", "a = x and (b = y or c = z)"),
        (
            "(a = x or a = y) and (b = z or b = q)",
            "a = x or a = y and (b = z or b = q)",
        ),
        ("((a))", "a"),
        ("(a and b) or c", "a and b or c"),
        ("a and (b and (c and d))", "a and (b and (c and d))"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(canonical(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_long_chain() {
    let input = (0..2000)
        .map(|i| format!("t{}", i))
        .collect::<Vec<_>>()
        .join(" or ");
    assert_eq!(canonical(&input), input);
}

#[test]
fn test_very_long_chain() {
    let input = (0..100_000)
        .map(|i| format!("t{}", i))
        .collect::<Vec<_>>()
        .join(" and ");

    let err = parse(&input, false).unwrap_err();
    assert_eq!(err.message(), "nesting too deep");

    let query = Parser::new().max_chain(100_000).parse(&input).unwrap();
    assert_eq!(query.to_string(), input);
    drop(query);
}

#[test]
fn test_chain_limit() {
    let test_cases = vec![
        ("a or b or c or d", true),
        ("a or b or c or d or e", false),
        ("(a or b or c or d) and e", true),
        ("a and (b or c or d or e or f)", false),
        ("a or b or (c or d or e) or f", true),
    ];

    for (input, accepted) in test_cases {
        let result = Parser::new().max_chain(3).parse(input);
        match result {
            Ok(query) => {
                assert!(accepted, "Expected rejection for input: {}", input);
                assert_eq!(query.to_string(), canonical(input));
            }
            Err(err) => {
                assert!(!accepted, "Failed for input: {}: {}", input, err);
                assert_eq!(err.message(), "nesting too deep");
            }
        }
    }
}

#[test]
fn test_built_long_chain() {
    let mut clause = Clause::search("t", "0");
    for i in 1..100_000 {
        clause = Clause::or(clause, Clause::search("t", i.to_string()));
    }
    let text = Query::new(clause).to_string();
    assert!(text.starts_with("t = 0 or t = 1 or t = 2"));
    assert!(text.ends_with("or t = 99999"));
}

// ============================================================================
// Quoting
// ============================================================================

#[test]
fn test_quoted_terms_round_trip() {
    let test_cases = vec![
        ("", "\"\""),
        ("alpha", "alpha"),
        ("two words", "\"two words\""),
        ("a=b", "\"a=b\""),
        ("a\"b", "\"a\\\"b\""),
        ("a\" b", "\"a\\\" b\""),
        ("abc\\", "abc\\\\"),
        ("a\\\"b", "\"a\\\"b\""),
        ("(x)", "\"(x)\""),
        ("a/b", "\"a/b\""),
    ];

    for (value, want) in test_cases {
        let query = Query::new(Clause::and(
            Clause::search("idx", value),
            Clause::search("idx2", "val2"),
        ));
        let expected = format!("idx = {} and idx2 = val2", want);
        assert_eq!(query.to_string(), expected, "Failed for value: {:?}", value);
        assert_eq!(canonical(&expected), expected, "Not stable for value: {:?}", value);
    }
}

#[test]
fn test_quote_function() {
    assert_eq!(quote("dc.title"), "dc.title");
    assert_eq!(quote("x y"), "\"x y\"");
    assert_eq!(quote("a<b"), "\"a<b\"");
    assert_eq!(quote("line\nbreak"), "\"line\nbreak\"");
}

// ============================================================================
// Node rendering
// ============================================================================

#[test]
fn test_sort_string() {
    assert_eq!(Sort::default().to_string(), "\"\"");
    assert_eq!(Sort::new("title").to_string(), "title");
    assert_eq!(
        Sort::new("title").with_modifier(Modifier::flag("case")).to_string(),
        "title/case"
    );
}

#[test]
fn test_modifier_string() {
    let test_cases = vec![
        (Modifier::default(), "\"\""),
        (Modifier::with_value("case", "", "true"), "case=true"),
        (Modifier::with_value("", "=", ""), "\"\""),
        (Modifier::with_value("", "", "true"), "\"\"=true"),
        (Modifier::with_value("case", "=", ""), "case"),
        (Modifier::with_value("case", "=", "true"), "case=true"),
        (Modifier::with_value("distance", "<=", "3"), "distance<=3"),
        (Modifier::with_value("locale", "=", "en US"), "locale=\"en US\""),
    ];

    for (modifier, expected) in test_cases {
        assert_eq!(modifier.to_string(), expected, "Failed for {:?}", modifier);
    }
}

#[test]
fn test_prefix_string() {
    assert_eq!(Prefix::default().to_string(), "> \"\"");
    assert_eq!(
        Prefix::unnamed("http://deepcustard.org/").to_string(),
        "> \"http://deepcustard.org/\""
    );
    assert_eq!(Prefix::new("dc", "").to_string(), "> dc = \"\"");
    assert_eq!(
        Prefix::new("dc", "http://deepcustard.org/").to_string(),
        "> dc = \"http://deepcustard.org/\""
    );
}

#[test]
fn test_search_clause_string() {
    let test_cases = vec![
        (Clause::search_with("title", "=", ""), "title = \"\""),
        (Clause::search_with("", "=", ""), "\"\""),
        (Clause::search_with("", "<>", ""), "cql.serverChoice <> \"\""),
        (Clause::search_with("title", "", ""), "title = \"\""),
        (term("lord of the rings"), "\"lord of the rings\""),
        (
            Clause::search("title", "lord of the rings"),
            "title = \"lord of the rings\"",
        ),
    ];

    for (clause, expected) in test_cases {
        assert_eq!(clause.to_string(), expected);
    }
}

#[test]
fn test_bool_clause_string() {
    let x = term("x");
    let y = term("y");

    let boolean = BoolClause {
        left: x.clone(),
        operator: Operator::And,
        modifiers: Vec::new(),
        right: y.clone(),
    };
    assert_eq!(boolean.to_string(), "x and y");

    let boolean = BoolClause {
        left: x.clone(),
        right: y.clone(),
        ..BoolClause::default()
    };
    assert_eq!(boolean.to_string(), "x and y");

    let boolean = BoolClause {
        right: y.clone(),
        ..BoolClause::default()
    };
    assert_eq!(boolean.to_string(), "cql.allRecords = 1 and y");

    let boolean = BoolClause {
        left: y.clone(),
        ..BoolClause::default()
    };
    assert_eq!(boolean.to_string(), "y and cql.allRecords = 1");

    let boolean = BoolClause {
        left: x.clone(),
        right: Clause::match_all().with_prefix(Prefix::new("dc", "http://deepcustard.org/")),
        ..BoolClause::default()
    };
    assert_eq!(
        boolean.to_string(),
        "x and (> dc = \"http://deepcustard.org/\" cql.allRecords = 1)"
    );

    assert_eq!(x.to_string(), "x");
    assert_eq!(y.to_string(), "y");
}

#[test]
fn test_bool_modifiers_are_written() {
    let clause = Clause::prox(term("a"), term("b")).with_modifiers([
        Modifier::with_value("unit", "=", "word"),
        Modifier::flag("ordered"),
    ]);
    assert_eq!(clause.to_string(), "a prox/unit=word/ordered b");
}

#[test]
fn test_query_with_sort_string() {
    let query = Query::new(term("fish"))
        .sort_by(Sort::new("dc.date").with_modifier(Modifier::flag("sort.descending")))
        .sort_by(Sort::new("dc.title"));
    assert_eq!(query.to_string(), "fish sortBy dc.date/sort.descending dc.title");
}

// ============================================================================
// Chain helpers
// ============================================================================

#[test]
fn test_chain_helpers() {
    let query = Query::new(Clause::or(
        Clause::and(
            Clause::search("id", "id1"),
            Clause::and(
                Clause::search("side", "borrowing"),
                Clause::search("requester_symbol", "PEER1"),
            ),
        ),
        Clause::and(
            Clause::search("side", "lending"),
            Clause::search("supplier_symbol", "PEER1"),
        ),
    ));

    assert_eq!(
        query.to_string(),
        "id = id1 and (side = borrowing and requester_symbol = PEER1) or (side = lending and supplier_symbol = PEER1)"
    );
}

#[test]
fn test_chain_helpers_grouping() {
    let query = Query::new(Clause::and(
        Clause::search("id", "id1"),
        Clause::or(
            Clause::and(
                Clause::search("side", "borrowing"),
                Clause::search("requester_symbol", "PEER1"),
            ),
            Clause::and(
                Clause::search("side", "lending"),
                Clause::search("supplier_symbol", "PEER1"),
            ),
        ),
    ));

    assert_eq!(
        query.to_string(),
        "id = id1 and (side = borrowing and requester_symbol = PEER1 or (side = lending and supplier_symbol = PEER1))"
    );
}

#[test]
fn test_chain_accessors() {
    let clause = Clause::not(Clause::search("a", "1"), Clause::search_with("b", "<", "2"));
    let boolean = clause.as_boolean().unwrap();
    assert_eq!(boolean.operator, Operator::Not);
    assert_eq!(boolean.right.as_search().unwrap().relation, "<");
    assert!(clause.as_search().is_none());
    assert!(Clause::match_all().is_match_all());
    assert_eq!(Query::default().to_string(), "cql.allRecords = 1");
}
