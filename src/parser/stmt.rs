use crate::{
    ast::{
        statements::{Block, Decl, DeclKind, FnDecl, Parameter, Stmt, StmtKind, VarDecl},
        types::{FunctionType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

/// Parses anything allowed directly inside a block.
pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    if let Some(handler) = parser.get_decl_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    Ok(Decl::statement(parse_stmt(parser)?))
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    if parser.get_decl_lookup().contains_key(&parser.current_token_kind()) {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("declarations are not allowed here"),
            },
            parser.current_line(),
        ));
    }

    let line = parser.current_line();
    let expr = parse_expr(parser, BindingPower::Default)?;

    parser.expect_error(TokenKind::Semicolon, "expected `;` after expression")?;

    Ok(Stmt {
        kind: StmtKind::Expression(expr),
        line,
    })
}

pub fn parse_var_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let line = parser.advance().line;

    let identifier =
        parser.expect_identifier("expected identifier during variable declaration")?;

    parser.expect_error(TokenKind::Colon, "expected `:` and a type after the variable name")?;
    let var_type = parse_type(parser)?;

    parser.expect_error(TokenKind::Assignment, "expected `=` and an initial value")?;
    let value = parse_expr(parser, BindingPower::Default)?;

    parser.expect_error(TokenKind::Semicolon, "expected `;` after variable declaration")?;

    Ok(Decl {
        kind: DeclKind::Variable(VarDecl {
            identifier,
            var_type,
            value,
        }),
        line,
    })
}

pub fn parse_fn_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let line = parser.advance().line;

    let identifier = parser.expect_identifier("expected function name")?;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let identifier = parser.expect_identifier("expected parameter name")?;
        parser.expect_error(TokenKind::Colon, "expected `:` and a parameter type")?;
        let param_type = parse_type(parser)?;
        parameters.push(Parameter {
            identifier,
            param_type,
        });

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect_error(TokenKind::CloseParen, "expected `)` after parameters")?;

    let return_type = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        parse_type(parser)?
    } else {
        Type::Void
    };

    let body = if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        None
    } else {
        Some(parse_block(parser)?)
    };

    let function_type = FunctionType::new(
        parameters
            .iter()
            .map(|parameter| parameter.param_type.clone())
            .collect(),
        return_type,
    );

    Ok(Decl {
        kind: DeclKind::Function(FnDecl {
            identifier,
            function_type,
            parameters,
            body,
        }),
        line,
    })
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    parser.expect_error(TokenKind::OpenParen, "expected `(` after print")?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_error(TokenKind::CloseParen, "expected `)` after print argument")?;
    parser.expect_error(TokenKind::Semicolon, "expected `;` after print")?;

    Ok(Stmt {
        kind: StmtKind::Print(expr),
        line,
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect_error(TokenKind::Semicolon, "expected `;` after return")?;

    Ok(Stmt {
        kind: StmtKind::Return(value),
        line,
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_branch = parse_stmt(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt {
        kind: StmtKind::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
        },
        line,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt {
        kind: StmtKind::While {
            condition,
            body: Box::new(body),
        },
        line,
    })
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    // for let i: number = 0; i < 10; i = i + 1 { ... }
    let line = parser.advance().line;

    let init = parse_decl(parser)?;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_error(TokenKind::Semicolon, "expected `;` after loop condition")?;

    let increment_line = parser.current_line();
    let increment = parse_expr(parser, BindingPower::Default)?;

    let body = parse_stmt(parser)?;

    Ok(Stmt {
        kind: StmtKind::For {
            init: Box::new(init),
            condition,
            increment: Box::new(Stmt {
                kind: StmtKind::Expression(increment),
                line: increment_line,
            }),
            body: Box::new(body),
        },
        line,
    })
}

pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    parser.expect_error(TokenKind::OpenCurly, "expected `{` to start a block")?;

    let mut declarations = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected());
        }
        declarations.push(parse_decl(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block { declarations })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.current_line();
    let block = parse_block(parser)?;

    Ok(Stmt {
        kind: StmtKind::Block(block),
        line,
    })
}
