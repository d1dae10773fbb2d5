use std::fmt::Display;
use std::rc::Rc;

use crate::token::Token;

/// Common surface of every tree node.
pub trait Node {
    /// Literal of the token that introduced the node.
    fn token_literal(&self) -> &str;
}

/// A sub-expression slot. `None` where the parser recorded an error instead.
pub type Operand = Option<Box<Expression>>;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
}

#[derive(Debug, PartialEq, Clone)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Option<Expression>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Option<Expression>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Option<Expression>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Identifier {
    pub token: Token,
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    PrefixExpression {
        token: Token,
        operator: PrefixOperator,
        right: Operand,
    },
    InfixExpression {
        token: Token,
        operator: InfixOperator,
        left: Operand,
        right: Operand,
    },
    IfExpression {
        token: Token,
        condition: Operand,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    CallExpression {
        token: Token,
        function: Operand,
        arguments: Vec<Option<Expression>>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperator {
    Minus,
    Bang,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        use PrefixOperator::*;
        match self {
            Minus => "-",
            Bang => "!",
        }
    }
}

impl InfixOperator {
    pub fn as_str(&self) -> &'static str {
        use InfixOperator::*;
        match self {
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
            LessThan => "<",
            GreaterThan => ">",
            Equal => "==",
            NotEqual => "!=",
        }
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", |statement| statement.token_literal())
    }
}

impl Node for Statement {
    fn token_literal(&self) -> &str {
        match self {
            Statement::Let(statement) => &statement.token.literal,
            Statement::Return(statement) => &statement.token.literal,
            Statement::Expression(statement) => &statement.token.literal,
        }
    }
}

impl Node for BlockStatement {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Node for Identifier {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        use Expression::*;
        match self {
            Identifier(ident) => &ident.token.literal,
            IntegerLiteral { token, .. }
            | Boolean { token, .. }
            | PrefixExpression { token, .. }
            | InfixExpression { token, .. }
            | IfExpression { token, .. }
            | FunctionLiteral { token, .. }
            | CallExpression { token, .. } => &token.literal,
        }
    }
}

/// Writes an expression slot. An absent expression writes `?`, which lexes as
/// ILLEGAL, so printed partial trees never reparse into a different valid tree.
struct Slot<'a, T>(&'a Option<T>);

impl<T: Display> Display for Slot<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "?"),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {};", self.name, Slot(&self.value))
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", Slot(&self.value))
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", Slot(&self.expression))
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        write!(f, "}}")
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(ident) => write!(f, "{}", ident),
            // the source text, so that `007` prints back as `007`
            IntegerLiteral { token, .. } => write!(f, "{}", token.literal),
            Boolean { value, .. } => write!(f, "{}", value),
            PrefixExpression {
                operator, right, ..
            } => write!(f, "({}{})", operator.as_str(), Slot(right)),
            InfixExpression {
                operator,
                left,
                right,
                ..
            } => write!(f, "({} {} {})", Slot(left), operator.as_str(), Slot(right)),
            IfExpression {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if ({}) {}", Slot(condition), consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            FunctionLiteral {
                parameters, body, ..
            } => {
                write!(
                    f,
                    "fn({}) {}",
                    parameters
                        .iter()
                        .map(|id| id.name.as_ref())
                        .collect::<Box<[&str]>>()
                        .join(", "),
                    body
                )
            }
            CallExpression {
                function,
                arguments,
                ..
            } => {
                write!(
                    f,
                    "{}({})",
                    Slot(function),
                    arguments
                        .iter()
                        .map(|arg| Slot(arg).to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            Let(statement) => write!(f, "{}", statement),
            Return(statement) => write!(f, "{}", statement),
            Expression(statement) => write!(f, "{}", statement),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}
