use super::types::TypeAnnotation;

/// One line of source text with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        SourceLine {
            number,
            text: text.into(),
        }
    }
}

/// A user function. The body is kept as source lines and parsed again on
/// every call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub params: Vec<String>,
    /// Parallel to `params`.
    pub param_types: Vec<TypeAnnotation>,
    pub body: Vec<SourceLine>,
}

impl FunctionDef {
    pub fn new(params: Vec<(String, TypeAnnotation)>, body: Vec<SourceLine>) -> Self {
        let (params, param_types) = params.into_iter().unzip();
        FunctionDef {
            params,
            param_types,
            body,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub explicit_type: Option<TypeAnnotation>,
    pub expr: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: String,
    pub function: FunctionDef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: String,
    pub then_block: Vec<SourceLine>,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(Vec<SourceLine>),
    If(Box<IfStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    /// `static name(params) { ... }`, registered as `Class.name`.
    Method { name: String, function: FunctionDef },
    /// `static name = expr;`, bound as the variable `Class.name`.
    Property { name: String, expr: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclStmt {
    pub name: String,
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub expr: Option<String>,
}

/// `name(arg, ...)` on its own line. Arguments are kept as text and
/// classified when the call runs.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub callee: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Blank line or `//` comment.
    Empty,
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    If(IfStmt),
    ClassDecl(ClassDeclStmt),
    Return(ReturnStmt),
    Call(CallStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    /// Line the statement starts on.
    pub line: usize,
    pub kind: StmtKind,
}
