//! This module provides the parser for the pipe-delimited rule notation, utilizing the `pest`
//! crate. It defines functions to parse textual rule lines into typed `Rule` values.

use crate::types::{
    Operation, Rule as MachineRule, Symbol, SymbolSpec, TuringMachineError, WILDCARD_TOKEN,
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the rule notation grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct RuleParser;

/// Parses a single rule line into a typed `Rule`.
///
/// This is the main entry point for parsing the textual rule notation. It trims
/// the input, parses it using the `RuleParser`, and maps the resulting parse
/// tree onto the typed representation.
///
/// # Arguments
///
/// * `input` - A string slice containing one rule line, e.g. `A|ε|P0,R|B`.
///
/// # Returns
///
/// * `Ok(Rule)` if the line is well formed.
/// * `Err(TuringMachineError::ParseError)` if there are any syntax errors.
pub fn parse_rule(input: &str) -> Result<MachineRule, TuringMachineError> {
    let root = RuleParser::parse(Rule::rule_line, input.trim())
        .map_err(|e| TuringMachineError::ParseError(e.into()))? //
        .next()
        .unwrap();

    parse_rule_line(root)
}

/// Parses a sequence of rule lines into an ordered rule table.
///
/// The input order is preserved, and it is significant: the machine resolves
/// exact matches by first occurrence and wildcard matches by last occurrence.
pub fn parse_rules<S: AsRef<str>>(lines: &[S]) -> Result<Vec<MachineRule>, TuringMachineError> {
    lines.iter().map(|line| parse_rule(line.as_ref())).collect()
}

/// Maps the parse tree of one rule line onto a `MachineRule`.
///
/// The grammar guarantees the field order: configuration, symbol spec,
/// operations, next configuration.
fn parse_rule_line(pair: Pair<Rule>) -> Result<MachineRule, TuringMachineError> {
    let mut pairs = pair.into_inner();

    let configuration = parse_string(&mut pairs);
    let symbol = parse_symbol_spec(pairs.next().unwrap())?;
    let operations = parse_operations(pairs.next().unwrap())?;
    let next = parse_string(&mut pairs);

    Ok(MachineRule {
        configuration,
        symbol,
        operations,
        next,
    })
}

/// Parses the symbol-spec field: the wildcard token, a position-qualified
/// symbol, or a plain symbol.
///
/// The wildcard token is only special as a plain spec. A qualified spec whose
/// symbol happens to be `ANY` matches the literal symbol, not everything.
/// A position index that does not fit in `usize` is a parse error.
fn parse_symbol_spec(pair: Pair<Rule>) -> Result<SymbolSpec, TuringMachineError> {
    let inner = pair.into_inner().next().unwrap();

    match inner.as_rule() {
        Rule::qualified_symbol => {
            let mut pairs = inner.into_inner();
            let symbol = parse_string(&mut pairs);

            let index = pairs.next().unwrap();
            let span = index.as_span();
            let token = index.as_str();
            let index = token.parse::<usize>().map_err(|_| {
                parse_error(&format!("Position index out of range: {token}"), span)
            })?;

            Ok(SymbolSpec::AtIndex(Symbol::from(symbol), index))
        }
        _ => {
            // Rule::plain_symbol
            let symbol = parse_string(&mut inner.into_inner());

            if symbol == WILDCARD_TOKEN {
                Ok(SymbolSpec::Any)
            } else {
                Ok(SymbolSpec::Plain(Symbol::from(symbol)))
            }
        }
    }
}

/// Parses the operations field into a typed operation sequence.
///
/// The field may be empty, which yields an empty sequence and makes the rule
/// a pure configuration change.
fn parse_operations(pair: Pair<Rule>) -> Result<Vec<Operation>, TuringMachineError> {
    let mut operations = Vec::new();

    for op_pair in pair.into_inner() {
        if op_pair.as_rule() == Rule::operation {
            operations.push(parse_operation(op_pair)?);
        }
    }

    Ok(operations)
}

/// Parses a single operation token.
///
/// Supports `P<symbol>` for print, `E` for erase, `R` and `L` for head
/// movement, and `N` for no-op. Any other single character is preserved as an
/// `Operation::Unknown` and reported at execution time rather than here.
fn parse_operation(pair: Pair<Rule>) -> Result<Operation, TuringMachineError> {
    let span = pair.as_span();
    let token = pair.as_str();

    if let Some(operand) = token.strip_prefix('P') {
        let mut chars = operand.chars();
        return match (chars.next(), chars.next()) {
            (Some(symbol), None) => Ok(Operation::Print(Symbol::from(symbol))),
            _ => Err(parse_error(
                &format!("Print operand must be a single symbol: {token}"),
                span,
            )),
        };
    }

    match token {
        "E" => Ok(Operation::Erase),
        "R" => Ok(Operation::Right),
        "L" => Ok(Operation::Left),
        "N" => Ok(Operation::Nop),
        _ => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Operation::Unknown(c)),
                _ => Err(parse_error(
                    &format!("Unsupported operation: {token}"),
                    span,
                )),
            }
        }
    }
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Extracts the string content from the current `Pair` in a `Pairs` iterator.
fn parse_string(pairs: &mut Pairs<Rule>) -> String {
    pairs.next().unwrap().as_str().into()
}
