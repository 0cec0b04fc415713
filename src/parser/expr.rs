use crate::{
    ast::expressions::{BinaryOperator, Expr, Identifier, Literal, UnaryOperator},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance();
            let value = token.value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.line,
                )
            })?;

            Ok(Expr::Literal(Literal::Number(value)))
        }
        TokenKind::String => Ok(Expr::Literal(Literal::String(parser.advance().value))),
        TokenKind::True => {
            parser.advance();
            Ok(Expr::Literal(Literal::Boolean(true)))
        }
        TokenKind::False => {
            parser.advance();
            Ok(Expr::Literal(Literal::Boolean(false)))
        }
        TokenKind::Identifier => {
            let name = parser.advance().value;
            Ok(Expr::Identifier(Identifier {
                name,
                id: parser.advance_id(),
            }))
        }
        _ => Err(parser.unexpected()),
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    let operator = match kind {
        TokenKind::Plus => BinaryOperator::Plus,
        TokenKind::Dash => BinaryOperator::Minus,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Percent => BinaryOperator::Modulo,
        TokenKind::And => BinaryOperator::And,
        TokenKind::Or => BinaryOperator::Or,
        TokenKind::NotEquals => BinaryOperator::NotEqual,
        TokenKind::Equals => BinaryOperator::Equal,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::GreaterEquals => BinaryOperator::GreaterEqual,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::LessEquals => BinaryOperator::LessEqual,
        _ => return None,
    };
    Some(operator)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = match binary_operator(parser.current_token_kind()) {
        Some(operator) => operator,
        None => return Err(parser.unexpected()),
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = match parser.advance().kind {
        TokenKind::Dash => UnaryOperator::Negate,
        _ => UnaryOperator::Not,
    };
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary {
        operator,
        operand: Box::new(operand),
    })
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();

    let target = match left {
        Expr::Identifier(identifier) => identifier,
        _ => {
            return Err(Error::new(
                ErrorImpl::InvalidAssignmentTarget,
                operator_token.line,
            ))
        }
    };

    // Right associative: `a = b = c` assigns `b` first
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assign {
        target,
        value: Box::new(value),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_error(TokenKind::CloseParen, "expected `)` after expression")?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect_error(TokenKind::CloseParen, "expected `)` after arguments")?;

    Ok(Expr::Call {
        callee: Box::new(left),
        arguments,
    })
}
