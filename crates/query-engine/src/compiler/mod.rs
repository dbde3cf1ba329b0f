use crate::{
    dictionary::Dictionary,
    error::{CompileError, Result},
    predicate::Predicate,
    resolver::Resolver,
    settings::{CompileOptions, OutputMode},
};
use model::{Expr, QueryNode, Scope};
use query::QueryCompiler;
use std::sync::Arc;
use tracing::debug;

mod query;

/// Result of [`Compiler::compile`], shaped by the configured output mode.
#[derive(Debug, Clone)]
pub enum Compiled {
    Predicate(Predicate),
    Source(String),
}

impl Compiled {
    pub fn into_predicate(self) -> Option<Predicate> {
        match self {
            Compiled::Predicate(predicate) => Some(predicate),
            Compiled::Source(_) => None,
        }
    }

    pub fn into_source(self) -> String {
        match self {
            Compiled::Predicate(predicate) => predicate.source(),
            Compiled::Source(source) => source,
        }
    }
}

/// Turns queries into predicates using a fixed dictionary and options.
///
/// A compiler holds no per-call state; one instance can compile any number of
/// queries, from any number of threads.
#[derive(Debug, Clone)]
pub struct Compiler {
    dictionary: Arc<Dictionary>,
    options: CompileOptions,
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::default()
    }

    /// Compiler with default options.
    pub fn new(dictionary: Dictionary) -> Result<Self> {
        Self::builder().dictionary(dictionary).build()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn compile(&self, query: impl Into<QueryNode>) -> Result<Compiled> {
        let predicate = self.compile_predicate(query)?;
        Ok(match self.options.output_mode {
            OutputMode::Function => Compiled::Predicate(predicate),
            OutputMode::String => Compiled::Source(predicate.source()),
        })
    }

    pub fn compile_predicate(&self, query: impl Into<QueryNode>) -> Result<Predicate> {
        let expr = self.compile_expr(query)?;
        Ok(Predicate::new(expr, self.options.entry_name.clone()))
    }

    /// Rendered source of the query, regardless of the output mode.
    pub fn compile_source(&self, query: impl Into<QueryNode>) -> Result<String> {
        Ok(self.compile_predicate(query)?.source())
    }

    /// The bare expression; `None` when the query has no constraint at all.
    pub fn compile_expr(&self, query: impl Into<QueryNode>) -> Result<Option<Expr>> {
        let query = query.into();
        debug!(
            "Compiling query with {} operator(s) (optimize: {}, mode: {:?})",
            self.dictionary.len(),
            self.options.optimize,
            self.options.output_mode
        );

        let resolver = Resolver::new(&self.dictionary, self.options.max_operator_depth);
        let compiler = QueryCompiler::new(resolver, &self.options);
        let expr = compiler.compile_query(&query, &Scope::root(&self.options.entry_name))?;

        match &expr {
            Some(expr) => debug!(
                "Compiled query into {} connective(s)",
                expr.connective_count()
            ),
            None => debug!("Query has no constraints; predicate matches everything"),
        }

        Ok(expr)
    }
}

#[derive(Debug, Default)]
pub struct CompilerBuilder {
    dictionary: Option<Arc<Dictionary>>,
    options: CompileOptions,
}

impl CompilerBuilder {
    pub fn dictionary(mut self, dictionary: impl Into<Arc<Dictionary>>) -> Self {
        self.dictionary = Some(dictionary.into());
        self
    }

    /// Replace every option at once, e.g. with a deserialized configuration.
    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn entry_name(mut self, entry_name: impl Into<String>) -> Self {
        self.options.entry_name = entry_name.into();
        self
    }

    pub fn optimize(mut self, optimize: bool) -> Self {
        self.options.optimize = optimize;
        self
    }

    pub fn negation_key(mut self, negation_key: impl Into<String>) -> Self {
        self.options.negation_key = negation_key.into();
        self
    }

    pub fn output_mode(mut self, output_mode: OutputMode) -> Self {
        self.options.output_mode = output_mode;
        self
    }

    pub fn max_operator_depth(mut self, depth: usize) -> Self {
        self.options.max_operator_depth = depth;
        self
    }

    pub fn build(self) -> Result<Compiler> {
        let dictionary = self.dictionary.ok_or_else(|| {
            CompileError::Config("compiler requires a dictionary".to_string())
        })?;
        self.options.validate()?;

        Ok(Compiler {
            dictionary,
            options: self.options,
        })
    }
}
