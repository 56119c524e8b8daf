use cql_lang::{Clause, Parser, Query, parse, to_xcql, to_xcql_pretty, write_xcql};
use indoc::indoc;
use std::io;

fn xcql(input: &str, indent: usize) -> String {
    let query = parse(input, false).unwrap_or_else(|e| panic!("{}: {}", input, e));
    to_xcql_pretty(&query, indent)
}

// ============================================================================
// Search clauses
// ============================================================================

#[test]
fn test_single_term() {
    let expected = indoc! {r#"
        <xcql xmlns="http://docs.oasis-open.org/ns/search-ws/xcql">
        <triple>
        <searchClause>
        <index>cql.serverChoice</index>
        <relation>
        <value>=</value>
        </relation>
        <term>myterm</term>
        </searchClause>
        </triple>
        </xcql>
    "#};
    assert_eq!(xcql("myterm", 0), expected);
}

#[test]
fn test_escaped_term_indented() {
    let expected = indoc! {r#"
        <xcql xmlns="http://docs.oasis-open.org/ns/search-ws/xcql">
          <triple>
            <searchClause>
              <index>cql.serverChoice</index>
              <relation>
                <value>=</value>
              </relation>
              <term>&lt;&amp;&gt;</term>
            </searchClause>
          </triple>
        </xcql>
    "#};
    assert_eq!(xcql("\"<&>\"", 2), expected);
}

#[test]
fn test_empty_term() {
    assert!(xcql("\"\"", 2).contains("      <term></term>\n"));
}

#[test]
fn test_relations() {
    let test_cases = vec![
        ("dc.title all andersen", "all"),
        ("dc.title cql.exact andersen", "cql.exact"),
        ("year < 1990", "&lt;"),
        ("year >= 1990", "&gt;="),
    ];

    for (input, relation) in test_cases {
        let xml = xcql(input, 0);
        assert!(
            xml.contains(&format!("<relation>\n<value>{}</value>\n</relation>\n", relation)),
            "Failed for input: {}\n{}",
            input,
            xml
        );
    }
}

#[test]
fn test_relation_modifiers() {
    let expected = indoc! {r#"
        <xcql xmlns="http://docs.oasis-open.org/ns/search-ws/xcql">
        <triple>
        <searchClause>
        <index>dc.title</index>
        <relation>
        <value>=</value>
        </relation>
        <modifiers>
        <modifier>
        <type>k1</type>
        <comparison>=</comparison>
        <value>v1</value>
        </modifier>
        <modifier>
        <type>k2</type>
        </modifier>
        </modifiers>
        <term>andersen</term>
        </searchClause>
        </triple>
        </xcql>
    "#};
    assert_eq!(xcql("dc.title =/k1=v1/k2 andersen", 0), expected);
}

#[test]
fn test_control_character_is_replaced() {
    let xml = xcql("\"\u{5}\"", 0);
    assert!(xml.contains("<term>\u{FFFD}</term>"));
}

// ============================================================================
// Boolean clauses
// ============================================================================

#[test]
fn test_nested_booleans() {
    let expected = indoc! {r#"
        <xcql xmlns="http://docs.oasis-open.org/ns/search-ws/xcql">
        <triple>
        <Boolean>
        <value>not</value>
        </Boolean>
        <leftOperand>
        <triple>
        <Boolean>
        <value>or</value>
        </Boolean>
        <leftOperand>
        <searchClause>
        <index>year</index>
        <relation>
        <value>&gt;</value>
        </relation>
        <term>1990</term>
        </searchClause>
        </leftOperand>
        <rightOperand>
        <searchClause>
        <index>cql.serverChoice</index>
        <relation>
        <value>=</value>
        </relation>
        <term>b</term>
        </searchClause>
        </rightOperand>
        </triple>
        </leftOperand>
        <rightOperand>
        <searchClause>
        <index>cql.serverChoice</index>
        <relation>
        <value>=</value>
        </relation>
        <term>c</term>
        </searchClause>
        </rightOperand>
        </triple>
        </xcql>
    "#};
    assert_eq!(xcql("year > 1990 or b not c", 0), expected);
}

#[test]
fn test_boolean_modifiers() {
    let expected = indoc! {r#"
        <xcql xmlns="http://docs.oasis-open.org/ns/search-ws/xcql">
        <triple>
        <Boolean>
        <value>prox</value>
        <modifiers>
        <modifier>
        <type>order</type>
        <comparison>=</comparison>
        <value>1</value>
        </modifier>
        <modifier>
        <type>default</type>
        <comparison>=</comparison>
        <value></value>
        </modifier>
        </modifiers>
        </Boolean>
        <leftOperand>
        <searchClause>
        <index>cql.serverChoice</index>
        <relation>
        <value>=</value>
        </relation>
        <term>a</term>
        </searchClause>
        </leftOperand>
        <rightOperand>
        <searchClause>
        <index>cql.serverChoice</index>
        <relation>
        <value>=</value>
        </relation>
        <term>b</term>
        </searchClause>
        </rightOperand>
        </triple>
        </xcql>
    "#};
    assert_eq!(xcql("(a prox/order=1/default=\"\" (b))", 0), expected);
}

// ============================================================================
// Prefixes and sort keys
// ============================================================================

#[test]
fn test_prefixes() {
    let expected = indoc! {r#"
        <xcql xmlns="http://docs.oasis-open.org/ns/search-ws/xcql">
        <prefixes>
        <prefix>
        <name>a</name>
        <identifier>uri1</identifier>
        </prefix>
        <prefix>
        <name></name>
        <identifier>uri2</identifier>
        </prefix>
        <prefix>
        <name>b</name>
        <identifier>uri3</identifier>
        </prefix>
        </prefixes>
        <triple>
        <searchClause>
        <index>dc.ti</index>
        <relation>
        <value>=</value>
        </relation>
        <term>a</term>
        </searchClause>
        </triple>
        </xcql>
    "#};
    assert_eq!(xcql(">a =uri1>uri2>b=uri3 dc.ti = a", 0), expected);
}

#[test]
fn test_nested_prefix_is_not_listed() {
    let xml = xcql("a and (>dc=uri dc.ti = a)", 0);
    assert!(!xml.contains("<prefixes>"));
    assert!(xml.contains("<index>dc.ti</index>"));
}

#[test]
fn test_sort_keys() {
    let expected = indoc! {r#"
        <xcql xmlns="http://docs.oasis-open.org/ns/search-ws/xcql">
         <triple>
          <searchClause>
           <index>cql.serverChoice</index>
           <relation>
            <value>=</value>
           </relation>
           <term>myterm1</term>
          </searchClause>
         </triple>
         <sortKeys>
          <key>
           <index>title</index>
          </key>
          <key>
           <index>year</index>
           <modifiers>
            <modifier>
             <type>asc</type>
            </modifier>
           </modifiers>
          </key>
         </sortKeys>
        </xcql>
    "#};
    assert_eq!(xcql("myterm1 sortby title year/asc", 1), expected);
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn test_match_all_query() {
    let xml = to_xcql(&Query::new(Clause::match_all()));
    assert!(xml.contains("<index>cql.allRecords</index>\n"));
    assert!(xml.contains("<term>1</term>\n"));
}

#[test]
fn test_long_chain() {
    let input = (0..50_000)
        .map(|i| format!("t{}", i))
        .collect::<Vec<_>>()
        .join(" and ");
    let query = Parser::new().max_chain(50_000).parse(&input).unwrap();

    let xml = to_xcql(&query);
    assert_eq!(xml.matches("<triple>").count(), 49_999);
    assert_eq!(xml.matches("</triple>").count(), 49_999);
    assert!(xml.contains("<leftOperand>\n<searchClause>\n<index>cql.serverChoice</index>"));
    assert!(xml.ends_with("<term>t49999</term>\n</searchClause>\n</rightOperand>\n</triple>\n</xcql>\n"));
}

#[test]
fn test_built_chain_indentation() {
    let clause = Clause::and(
        Clause::and(Clause::search("a", "1"), Clause::search("b", "2")),
        Clause::search("c", "3"),
    );
    let xml = to_xcql_pretty(&Query::new(clause), 1);
    assert!(xml.contains("  <Boolean>\n   <value>and</value>\n"));
    assert!(xml.contains("\n  <leftOperand>\n   <triple>\n"));
    assert!(xml.contains("\n    <leftOperand>\n     <searchClause>\n      <index>a</index>\n"));
    assert!(xml.contains("\n      <term>1</term>\n"));
    assert!(xml.contains("\n    <rightOperand>\n     <searchClause>\n      <index>b</index>\n"));
    assert!(xml.contains("\n  <rightOperand>\n   <searchClause>\n    <index>c</index>\n"));
}

#[test]
fn test_write_xcql() {
    let query = parse("fish", false).unwrap();
    let mut buffer = Vec::new();
    write_xcql(&query, 0, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), to_xcql(&query));
}

struct FailWriter;

impl io::Write for FailWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("write error"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_xcql_reports_writer_errors() {
    let query = parse("a", false).unwrap();
    let err = write_xcql(&query, 0, FailWriter).unwrap_err();
    assert_eq!(err.to_string(), "write error");
}
