//! This module provides encoding functionality for converting typed rules back into the
//! pipe-delimited textual notation understood by the parser.

use crate::types::{
    Operation, Rule, SymbolSpec, TuringMachineError, OPERATION_DELIMITER, RULE_DELIMITER,
    WILDCARD_TOKEN,
};

/// Encodes a typed rule into its textual form.
///
/// Format: `configuration|symbol-spec|op1,op2,...|next-configuration`. This is
/// the inverse of `parser::parse_rule`: every line this function produces
/// parses back to a rule structurally equal to the input.
///
/// # Arguments
///
/// * `rule` - The rule to encode.
///
/// # Returns
///
/// * `Ok(String)` - The encoded rule line.
/// * `Err(TuringMachineError::EncodeError)` if the rule cannot be represented
///   in the notation: a delimiter character inside a field, a multi-character
///   print operand, or a plain symbol equal to the wildcard token.
pub fn encode_rule(rule: &Rule) -> Result<String, TuringMachineError> {
    check_configuration(&rule.configuration)?;
    check_configuration(&rule.next)?;

    let symbol_spec = encode_symbol_spec(&rule.symbol)?;
    let operations = encode_operations(&rule.operations)?;

    Ok(format!(
        "{}{delim}{}{delim}{}{delim}{}",
        rule.configuration,
        symbol_spec,
        operations,
        rule.next,
        delim = RULE_DELIMITER
    ))
}

/// Encodes a sequence of rules, preserving their order.
pub fn encode_rules(rules: &[Rule]) -> Result<Vec<String>, TuringMachineError> {
    rules.iter().map(encode_rule).collect()
}

/// Encodes the symbol-spec field.
fn encode_symbol_spec(spec: &SymbolSpec) -> Result<String, TuringMachineError> {
    match spec {
        SymbolSpec::Plain(symbol) => {
            check_symbol(symbol.as_str())?;

            // A plain `ANY` would read back as the wildcard, not the symbol.
            if symbol.as_str() == WILDCARD_TOKEN {
                return Err(TuringMachineError::EncodeError(format!(
                    "Plain symbol collides with the wildcard token: {symbol}"
                )));
            }

            Ok(symbol.to_string())
        }
        SymbolSpec::AtIndex(symbol, index) => {
            check_symbol(symbol.as_str())?;

            Ok(format!("{}{}{}", symbol, OPERATION_DELIMITER, index))
        }
        SymbolSpec::Any => Ok(WILDCARD_TOKEN.to_string()),
    }
}

/// Encodes the operations field. An empty sequence encodes as an empty field.
fn encode_operations(operations: &[Operation]) -> Result<String, TuringMachineError> {
    let tokens = operations
        .iter()
        .map(encode_operation)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tokens.join(","))
}

/// Encodes one operation token.
///
/// The print opcode is immediately followed by its operand with no separator,
/// so the operand must be exactly one character.
fn encode_operation(operation: &Operation) -> Result<String, TuringMachineError> {
    match operation {
        Operation::Print(symbol) => {
            let mut chars = symbol.as_str().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c != RULE_DELIMITER && c != OPERATION_DELIMITER => {
                    Ok(format!("P{c}"))
                }
                _ => Err(TuringMachineError::EncodeError(format!(
                    "Print operand must be a single symbol: {symbol}"
                ))),
            }
        }
        Operation::Erase => Ok("E".to_string()),
        Operation::Right => Ok("R".to_string()),
        Operation::Left => Ok("L".to_string()),
        Operation::Nop => Ok("N".to_string()),
        Operation::Unknown(c) => {
            // A reserved opcode or delimiter would read back as something else.
            if matches!(c, 'P' | 'E' | 'R' | 'L' | 'N')
                || *c == RULE_DELIMITER
                || *c == OPERATION_DELIMITER
            {
                Err(TuringMachineError::EncodeError(format!(
                    "Operation token is not representable: {c}"
                )))
            } else {
                Ok(c.to_string())
            }
        }
    }
}

/// Checks that a configuration name is representable as a rule field.
/// Commas are fine here, the outer fields are split on the field delimiter only.
fn check_configuration(name: &str) -> Result<(), TuringMachineError> {
    if name.is_empty() {
        return Err(TuringMachineError::EncodeError(
            "Configuration name must not be empty".to_string(),
        ));
    }

    if name.contains(RULE_DELIMITER) {
        return Err(TuringMachineError::EncodeError(format!(
            "Configuration name contains the field delimiter: {name}"
        )));
    }

    Ok(())
}

/// Checks that a symbol token is representable inside the symbol-spec field.
fn check_symbol(token: &str) -> Result<(), TuringMachineError> {
    if token.is_empty() {
        return Err(TuringMachineError::EncodeError(
            "Symbol must not be empty".to_string(),
        ));
    }

    if token.contains(RULE_DELIMITER) || token.contains(OPERATION_DELIMITER) {
        return Err(TuringMachineError::EncodeError(format!(
            "Symbol contains a delimiter character: {token}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_rule, parse_rules};
    use crate::types::Symbol;

    #[test]
    fn test_encode_basic_rule() {
        let rule = Rule {
            configuration: "A".to_string(),
            symbol: SymbolSpec::Plain(Symbol::blank()),
            operations: vec![Operation::Print(Symbol::from("0")), Operation::Right],
            next: "B".to_string(),
        };

        assert_eq!(encode_rule(&rule).unwrap(), "A|ε|P0,R|B");
    }

    #[test]
    fn test_encode_wildcard_and_qualified() {
        let wildcard = Rule {
            configuration: "B".to_string(),
            symbol: SymbolSpec::Any,
            operations: vec![Operation::Right],
            next: "C".to_string(),
        };
        assert_eq!(encode_rule(&wildcard).unwrap(), "B|ANY|R|C");

        let qualified = Rule {
            configuration: "INCREMENT".to_string(),
            symbol: SymbolSpec::AtIndex(Symbol::from("1"), 0),
            operations: vec![Operation::Nop],
            next: "REWIND2".to_string(),
        };
        assert_eq!(encode_rule(&qualified).unwrap(), "INCREMENT|1,0|N|REWIND2");
    }

    #[test]
    fn test_encode_empty_operations() {
        let rule = Rule {
            configuration: "O".to_string(),
            symbol: SymbolSpec::Plain(Symbol::from("0")),
            operations: vec![],
            next: "Q".to_string(),
        };

        assert_eq!(encode_rule(&rule).unwrap(), "O|0||Q");
    }

    #[test]
    fn test_round_trip() {
        let lines = [
            "A|ε|P0,R|B",
            "B|ANY|R|C",
            "INCREMENT|1,0|N|REWIND2",
            "O|0||Q",
            "B|ε|Pə,R,Pə,R,P0,R,R,P0,L,L|O",
            "P|x|E,R|Q",
        ];

        let rules = parse_rules(&lines).unwrap();
        let encoded = encode_rules(&rules).unwrap();

        assert_eq!(encoded, lines);

        let reparsed = parse_rules(&encoded).unwrap();
        assert_eq!(reparsed, rules);
    }

    #[test]
    fn test_encode_rejects_multi_char_print_operand() {
        let rule = Rule {
            configuration: "A".to_string(),
            symbol: SymbolSpec::Any,
            operations: vec![Operation::Print(Symbol::from("10"))],
            next: "B".to_string(),
        };

        let result = encode_rule(&rule);
        assert!(matches!(result, Err(TuringMachineError::EncodeError(_))));
        assert!(result.unwrap_err().to_string().contains("Print operand"));
    }

    #[test]
    fn test_encode_rejects_delimiter_in_fields() {
        let bad_symbol = Rule {
            configuration: "A".to_string(),
            symbol: SymbolSpec::Plain(Symbol::from("a,b")),
            operations: vec![],
            next: "B".to_string(),
        };
        assert!(encode_rule(&bad_symbol).is_err());

        let bad_configuration = Rule {
            configuration: "A|B".to_string(),
            symbol: SymbolSpec::Any,
            operations: vec![],
            next: "C".to_string(),
        };
        assert!(encode_rule(&bad_configuration).is_err());
    }

    #[test]
    fn test_encode_rejects_wildcard_collision() {
        let rule = Rule {
            configuration: "A".to_string(),
            symbol: SymbolSpec::Plain(Symbol::from(WILDCARD_TOKEN)),
            operations: vec![],
            next: "B".to_string(),
        };

        assert!(encode_rule(&rule).is_err());

        // Pinned to a position the token is an ordinary symbol.
        let qualified = parse_rule("A|ANY,3|R|B").unwrap();
        assert_eq!(encode_rule(&qualified).unwrap(), "A|ANY,3|R|B");
    }

    #[test]
    fn test_encode_unknown_operation() {
        let rule = Rule {
            configuration: "A".to_string(),
            symbol: SymbolSpec::Any,
            operations: vec![Operation::Unknown('X')],
            next: "B".to_string(),
        };
        assert_eq!(encode_rule(&rule).unwrap(), "A|ANY|X|B");

        let reserved = Rule {
            operations: vec![Operation::Unknown('E')],
            ..rule
        };
        assert!(encode_rule(&reserved).is_err());
    }
}
