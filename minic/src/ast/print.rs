//! Render an AST back to minic source

use super::{Block, FunDecl, Item, LValue, Program, Stmt, VarDecl};
use std::fmt::{self, Write};

const INDENT: &str = "    ";

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match item {
                Item::Global(decl) => writeln!(f, "{decl};")?,
                Item::FunDecl(fun) => write!(f, "{fun}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty.declare(&self.name))
    }
}

impl fmt::Display for FunDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ret_ty.declare(&self.name))?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") ")?;
        let mut out = String::new();
        write_block(&mut out, &self.body, 0)?;
        writeln!(f, "{out}")
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Writes `{ ... }` starting at the current column; the closing brace is
/// indented to `depth`.
fn write_block(out: &mut String, block: &Block, depth: usize) -> fmt::Result {
    writeln!(out, "{{")?;
    for decl in &block.decls {
        indent(out, depth + 1);
        writeln!(out, "{decl};")?;
    }
    for stmt in &block.stmts {
        indent(out, depth + 1);
        write_stmt(out, stmt, depth + 1)?;
        writeln!(out)?;
    }
    indent(out, depth);
    write!(out, "}}")
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) -> fmt::Result {
    match stmt {
        Stmt::Block(block) => write_block(out, block, depth),
        Stmt::Assign { target, value } => match target {
            LValue::Var(name) => write!(out, "{name} = {value};"),
            LValue::Index { array, index } => write!(out, "{array}[{index}] = {value};"),
        },
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            write!(out, "if ({cond}) ")?;
            write_body(out, then_branch, depth)?;
            if let Some(else_branch) = else_branch {
                write!(out, " else ")?;
                write_body(out, else_branch, depth)?;
            }
            Ok(())
        }
        Stmt::While { cond, body } => {
            write!(out, "while ({cond}) ")?;
            write_body(out, body, depth)
        }
        Stmt::Expr(expr) => write!(out, "{expr};"),
        Stmt::Return(Some(value)) => write!(out, "return {value};"),
        Stmt::Return(None) => write!(out, "return;"),
    }
}

/// Branch and loop bodies always print braced
fn write_body(out: &mut String, stmt: &Stmt, depth: usize) -> fmt::Result {
    match stmt {
        Stmt::Block(block) => write_block(out, block, depth),
        other => {
            writeln!(out, "{{")?;
            indent(out, depth + 1);
            write_stmt(out, other, depth + 1)?;
            writeln!(out)?;
            indent(out, depth);
            write!(out, "}}")
        }
    }
}
