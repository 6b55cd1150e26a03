use anyhow::Result;
use anyedn::lex::{LexError, TokenKind};
use anyedn::read::decode_string;
use anyedn::settings::DEFAULT_MAX_DEPTH;
use anyedn::value::Parenkind;
use anyedn::{dumps, loads, loads_with, Map, ReadError, Set, Settings, Value};
use num::BigInt;

fn err(s: &str) -> ReadError {
    loads(s).unwrap_err().err
}

#[test]
fn scalars() -> Result<()> {
    assert_eq!(loads("42")?, Value::int(42));
    assert_eq!(loads("-42")?, Value::int(-42));
    assert_eq!(loads("+7")?, Value::int(7));
    assert_eq!(loads("1.2")?, Value::Float(1.2));
    assert_eq!(loads("-0.5")?, Value::Float(-0.5));
    assert_eq!(loads("true")?, Value::Bool(true));
    assert_eq!(loads("false")?, Value::Bool(false));
    assert_eq!(loads("nil")?, Value::Nil);
    assert_eq!(loads("foo")?, Value::symbol("foo"));
    assert_eq!(loads("my.ns/foo")?, Value::symbol("my.ns/foo"));
    assert_eq!(loads(":keyword")?, Value::keyword("keyword"));
    assert_eq!(loads(":my.ns/key")?, Value::keyword("my.ns/key"));
    assert_eq!(loads(r#""hi there""#)?, Value::string("hi there"));
    Ok(())
}

#[test]
fn big_integers() -> Result<()> {
    let n: BigInt = "123456789012345678901234567890".parse()?;
    assert_eq!(loads("123456789012345678901234567890")?, Value::Int(n.clone()));
    assert_eq!(loads("-123456789012345678901234567890")?, Value::Int(-n));
    Ok(())
}

#[test]
fn special_floats() -> Result<()> {
    assert_eq!(loads("##Inf")?, Value::Float(f64::INFINITY));
    assert_eq!(loads("##-Inf")?, Value::Float(f64::NEG_INFINITY));
    assert!(loads("##NaN")?.as_float().map_or(false, f64::is_nan));
    Ok(())
}

#[test]
fn characters() -> Result<()> {
    assert_eq!(loads(r"\a")?, Value::Char('a'));
    assert_eq!(loads(r"\é")?, Value::Char('é'));
    assert_eq!(loads(r"\newline")?, Value::Char('\n'));
    assert_eq!(loads(r"\tab")?, Value::Char('\t'));
    assert_eq!(loads(r"\return")?, Value::Char('\r'));
    assert_eq!(loads(r"\space")?, Value::Char(' '));
    assert_eq!(loads(r"\,")?, Value::Char(','));
    Ok(())
}

#[test]
fn named_characters_equal_their_one_character_forms() -> Result<()> {
    for (named, literal) in [(r"\newline", "\\\n"),
                             (r"\tab", "\\\t"),
                             (r"\return", "\\\r"),
                             (r"\space", "\\ ")] {
        let v = loads(literal)?;
        assert_eq!(v, loads(named)?);
        assert_eq!(dumps(&v)?, named);
    }
    assert_eq!(loads("[\\\t \\\n]")?,
               Value::Vector(vec![Value::Char('\t'), Value::Char('\n')]));
    Ok(())
}

#[test]
fn collections() -> Result<()> {
    assert_eq!(loads("(1 true nil)")?,
               Value::List(vec![Value::int(1), Value::Bool(true), Value::Nil]));
    assert_eq!(loads("[1 [2]]")?,
               Value::Vector(vec![Value::int(1), Value::Vector(vec![Value::int(2)])]));

    let v = loads("{:foo 42}")?;
    let m = v.as_map().unwrap();
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&Value::keyword("foo")), Some(&Value::int(42)));

    let s = loads("#{1 \"a\" :b}")?;
    let s = s.as_set().unwrap();
    assert_eq!(s.len(), 3);
    assert!(s.contains(&Value::string("a")));
    assert!(s.contains(&Value::keyword("b")));
    Ok(())
}

#[test]
fn empty_collections_are_distinct() -> Result<()> {
    let vs = [loads("()")?, loads("[]")?, loads("{}")?, loads("#{}")?];
    assert_eq!(vs[0], Value::List(vec![]));
    assert_eq!(vs[1], Value::Vector(vec![]));
    assert_eq!(vs[2], Value::Map(Map::new()));
    assert_eq!(vs[3], Value::Set(Set::new()));
    for i in 0..vs.len() {
        for j in 0..vs.len() {
            assert_eq!(i == j, vs[i] == vs[j]);
        }
    }
    let texts: Vec<String> = vs.iter().map(dumps::<Value>).collect::<Result<_, _>>()?;
    assert_eq!(texts, ["()", "[]", "{}", "#{}"]);
    Ok(())
}

#[test]
fn keyword_is_not_symbol() -> Result<()> {
    assert_ne!(loads(":foo")?, loads("foo")?);
    assert_ne!(loads(":foo")?, loads(r#""foo""#)?);
    Ok(())
}

#[test]
fn keyword_names() -> Result<()> {
    assert_eq!(loads(":true")?, Value::keyword("true"));
    assert_eq!(loads(":nil")?, Value::keyword("nil"));
    assert_eq!(loads(": foo")?, Value::keyword("foo"));
    assert_eq!(loads("[:a :\nb]")?,
               Value::Vector(vec![Value::keyword("a"), Value::keyword("b")]));
    assert_eq!(loads(": ; name on the next line\n my.ns/key")?,
               Value::keyword("my.ns/key"));
    assert!(matches!(err(":"), ReadError::UnexpectedEof));
    assert!(matches!(err(":1"), ReadError::Unexpected(TokenKind::Number)));
    assert!(matches!(err(":\"a\""), ReadError::Unexpected(TokenKind::String)));
    Ok(())
}

#[test]
fn comments_and_commas() -> Result<()> {
    let v = loads("; leading comment\n[1, 2,,, 3] ; trailing")?;
    assert_eq!(v, Value::Vector(vec![Value::int(1), Value::int(2), Value::int(3)]));
    Ok(())
}

#[test]
fn maps_and_sets_compare_unordered() -> Result<()> {
    assert_eq!(loads("{:a 1 :b 2}")?, loads("{:b 2 :a 1}")?);
    assert_eq!(loads("#{1 2 3}")?, loads("#{3 1 2}")?);
    assert_ne!(loads("[1 2]")?, loads("[2 1]")?);
    assert_ne!(loads("{:a 1}")?, loads("{:a 2}")?);
    Ok(())
}

#[test]
fn duplicate_map_keys_keep_first_position_last_value() -> Result<()> {
    let v = loads("{:a 1 :b 2 :a 3}")?;
    let m = v.as_map().unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.get(&Value::keyword("a")), Some(&Value::int(3)));
    assert_eq!(dumps(&v)?, "{:a 3, :b 2}");
    Ok(())
}

#[test]
fn duplicate_set_members_collapse() -> Result<()> {
    let v = loads("#{1 2 1 [1] [1]}")?;
    assert_eq!(v.as_set().unwrap().len(), 3);
    assert_eq!(dumps(&v)?, "#{1 2 [1]}");
    Ok(())
}

#[test]
fn insertion_order_is_kept() -> Result<()> {
    let v = loads("{:z 1 :a 2 :m 3}")?;
    let keys: Vec<&str> = v.as_map().unwrap().keys()
        .filter_map(Value::as_keyword).collect();
    assert_eq!(keys, ["z", "a", "m"]);
    Ok(())
}

#[test]
fn string_escapes() -> Result<()> {
    assert_eq!(decode_string(r#""a\"b\\c""#)?, "a\"b\\c");
    assert_eq!(decode_string(r#""\b\f\n\r\t\/""#)?, "\x08\x0C\n\r\t/");
    assert_eq!(decode_string(r#""é\u0001""#)?, "é\u{1}");
    assert_eq!(decode_string(r#""😀""#)?, "😀");
    assert_eq!(decode_string(r#""""#)?, "");
    assert_eq!(loads(r#""café""#)?, Value::string("café"));
    Ok(())
}

#[test]
fn bad_string_escapes() {
    assert!(matches!(decode_string(r#""\q""#), Err(ReadError::InvalidEscapedChar('q'))));
    assert!(matches!(decode_string(r#""\u12g4""#), Err(ReadError::NonHexDigit('g'))));
    assert!(matches!(decode_string(r#""\u12""#), Err(ReadError::MalformedString)));
    assert!(matches!(decode_string(r#""\ud83d""#), Err(ReadError::InvalidCodePoint(0xd83d))));
    assert!(matches!(decode_string(r#""\udc00""#), Err(ReadError::InvalidCodePoint(0xdc00))));
    assert!(matches!(decode_string("no quotes"), Err(ReadError::MalformedString)));

    let e = loads(r#"[1 "\q"]"#).unwrap_err();
    assert!(matches!(e.err, ReadError::InvalidEscapedChar('q')));
    assert_eq!(e.pos.offset, 3);
}

#[test]
fn structural_errors() {
    assert!(matches!(err(""), ReadError::UnexpectedEof));
    assert!(matches!(err("  ; nothing"), ReadError::UnexpectedEof));
    assert!(matches!(err(")"), ReadError::Unexpected(TokenKind::CloseList)));
    assert!(matches!(err("(]"), ReadError::Unexpected(TokenKind::CloseVector)));
    assert!(matches!(err("1 2"), ReadError::Unexpected(TokenKind::Number)));
    assert!(matches!(err("{:a}"), ReadError::Unexpected(TokenKind::CloseMap)));
    assert!(matches!(err("(1 2"),
                     ReadError::PrematureEofExpectingClosingParen(Parenkind::Round)));
    assert!(matches!(err("[1 (2)"),
                     ReadError::PrematureEofExpectingClosingParen(Parenkind::Square)));
    assert!(matches!(err("#{1"),
                     ReadError::PrematureEofExpectingClosingParen(Parenkind::HashCurly)));
    assert!(matches!(err("{:a"),
                     ReadError::PrematureEofExpectingClosingParen(Parenkind::Curly)));
    assert!(matches!(err("{:a 1"),
                     ReadError::PrematureEofExpectingClosingParen(Parenkind::Curly)));
    assert!(matches!(err("(1 @)"), ReadError::Lex(LexError::NoMatch('@'))));
    assert!(matches!(err("\"abc"), ReadError::Lex(LexError::UnterminatedString)));
}

#[test]
fn error_messages_carry_positions() {
    let e = loads("[1\n 2)").unwrap_err();
    assert_eq!(e.to_string(), "ran into a close-list where it wasn't expected @2.2");
    let e = loads("\n  (1 2").unwrap_err();
    assert_eq!(e.to_string(),
               "premature EOF while expecting closing character ')' for '(' @2.2");
    let e = loads("[1 2] 3").unwrap_err();
    assert_eq!(e.pos.offset, 6);
}

#[test]
fn nesting_depth_is_limited() -> Result<()> {
    assert_eq!(Settings::default().max_depth, DEFAULT_MAX_DEPTH);
    let settings = Settings::default().max_depth(3);
    assert_eq!(loads_with("[[[1]]]", &settings)?,
               loads("[[[1]]]")?);
    let e = loads_with("[[{:a [1]}]]", &settings).unwrap_err();
    assert!(matches!(e.err, ReadError::NestingTooDeep));
    assert_eq!(e.pos.offset, 6);

    let deep = format!("{}{}", "(".repeat(100), ")".repeat(100));
    let e = loads_with(&deep, &Settings::default().max_depth(50)).unwrap_err();
    assert!(matches!(e.err, ReadError::NestingTooDeep));
    Ok(())
}
