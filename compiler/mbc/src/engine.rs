use std::collections::VecDeque;
use std::mem;

use log::{debug, info, warn};
use mbc_ast::FunctionSpec;
use mbc_env::{Definition, FunctionTable, VariableTable};
use mbc_eval::{
    evaluate_infix, is_native, substitute_variables, EvalError, Evaluation, Expander, Expansion,
};
use mbc_lexer::token::{concat_tokens, format_number, render_tokens};
use mbc_lexer::{is_valid_name, tokenize, Token, TokenType};
use mbc_parser::{
    check_structure, clean_statement, parse_definition, split_statements, to_postfix,
    validate_definition,
};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineWarning};
use crate::help;

/// Returned by [`Engine::get_result`] once every result has been read.
pub const RESULT_END: &str = "RESULT_END";

/// Whether the rest of the batch runs after a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    EndBatch,
}

/// One evaluation session: variables, functions, the statements waiting to
/// run and the output of the last [`Engine::evaluate`] call.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    functions: FunctionTable,
    variables: VariableTable,
    pending: Vec<String>,
    results: VecDeque<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            functions: FunctionTable::with_builtins(),
            variables: VariableTable::new(),
            pending: Vec::new(),
            results: VecDeque::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Queues the `;` separated statements of `text`. Whitespace outside
    /// quotes is dropped, as are comments; empty statements are skipped.
    pub fn load(&mut self, text: &str) {
        let delimiter = self.config.comment_delimiter;
        for raw in split_statements(text, delimiter) {
            if let Some(statement) = clean_statement(raw, delimiter) {
                debug!("queued statement {:?}", statement);
                self.pending.push(statement);
            }
        }
    }

    /// Runs every queued statement. Results, errors and warnings of any
    /// previous batch are discarded first.
    pub fn evaluate(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.results.clear();
        self.errors.clear();
        self.warnings.clear();

        let batch = mem::take(&mut self.pending);
        info!("evaluating batch of {} statement(s)", batch.len());

        if let Some(first) = batch.first() {
            if self.run_command(first) {
                if batch.len() > 1 {
                    debug!("dropping {} statement(s) after command", batch.len() - 1);
                }
                return;
            }
        }

        for (index, statement) in batch.iter().enumerate() {
            let number = index + 1;
            let flow = match self.run_statement(number, statement) {
                Ok(flow) => flow,
                Err((err, flow)) => {
                    self.record_error(number, &err);
                    flow
                }
            };
            if flow == Flow::EndBatch {
                if number < batch.len() {
                    debug!(
                        "dropping {} statement(s) after statement {}",
                        batch.len() - number,
                        number
                    );
                }
                break;
            }
        }
    }

    /// Pops the oldest unread result, or [`RESULT_END`] when none is left.
    pub fn get_result(&mut self) -> String {
        self.results
            .pop_front()
            .unwrap_or_else(|| RESULT_END.to_string())
    }

    /// Errors of the last batch, one per line.
    pub fn get_error_message(&self) -> String {
        self.errors.join("\n")
    }

    /// Warnings of the last batch, one per line.
    pub fn get_warning_message(&self) -> String {
        self.warnings.join("\n")
    }

    pub fn help(&self) -> String {
        help::help_text(&self.functions)
    }

    pub fn report(&self) -> String {
        help::report_text(&self.variables, &self.functions)
    }

    /// Postfix form of an expression after variable substitution and
    /// function expansion, e.g. `1 2 3 * +` for `1+2*3`.
    pub fn postfix(&self, expression: &str) -> Result<String, EngineError> {
        let statement =
            clean_statement(expression, self.config.comment_delimiter).unwrap_or_default();
        let expansion = self.prepare(&tokenize(&statement)?)?;
        let postfix =
            to_postfix(&expansion.tokens, self.config.converter()).map_err(EvalError::from)?;
        Ok(render_tokens(&postfix))
    }

    /// Handles `help`, `report`, `reset` and `reset#name`. Returns `false`
    /// when `statement` is none of them.
    fn run_command(&mut self, statement: &str) -> bool {
        match statement {
            "help" => {
                let text = self.help();
                self.results.push_back(text);
            }
            "report" => {
                let text = self.report();
                self.results.push_back(text);
            }
            "reset" => {
                self.functions.reset_all();
                self.variables.clear();
                info!("session reset");
                self.results
                    .push_back("functions and variables reset".to_string());
            }
            _ => {
                let Some(name) = statement.strip_prefix("reset#") else {
                    return false;
                };
                match self.functions.reset_one(name) {
                    Ok(spec) => {
                        let message = format!("{} restored", spec.signature());
                        self.results.push_back(message);
                    }
                    Err(err) => self.record_error(1, &EngineError::from(err)),
                }
            }
        }
        true
    }

    /// Runs one statement. On failure the error comes back with whether the
    /// batch goes on.
    fn run_statement(
        &mut self,
        number: usize,
        statement: &str,
    ) -> Result<Flow, (EngineError, Flow)> {
        let delimiter = self.config.comment_delimiter;
        check_structure(statement, delimiter)
            .map_err(|err| (EngineError::from(err), Flow::Continue))?;

        if let Some(parsed) = parse_definition(statement, delimiter) {
            debug!("statement {} is a definition", number);
            return self
                .define(parsed.map_err(EngineError::from))
                .map_err(|err| (err, Flow::EndBatch));
        }

        let tokens =
            tokenize(statement).map_err(|err| (EngineError::from(err), Flow::Continue))?;
        self.assign(number, tokens)
            .map(|()| Flow::Continue)
            .map_err(|err| (err, Flow::Continue))
    }

    /// Registers a definition. A definition always ends the batch.
    fn define(
        &mut self,
        parsed: Result<FunctionSpec, EngineError>,
    ) -> Result<Flow, EngineError> {
        let spec = parsed?;
        let functions = &self.functions;
        validate_definition(
            &spec,
            |name| functions.contains(name) || is_native(name),
            self.config.converter(),
        )?;

        let signature = spec.signature();
        let message = match self.functions.define(spec) {
            Definition::Added => format!("{signature} defined"),
            Definition::Replaced => format!("{signature} redefined"),
        };
        self.results.push_back(message);
        Ok(Flow::EndBatch)
    }

    /// Variable substitution followed by function expansion.
    fn prepare(&self, tokens: &[Token]) -> Result<Expansion, EngineError> {
        let substituted = substitute_variables(tokens, &self.variables);
        let mut expander = Expander::new(&self.functions, self.config.expansion());
        Ok(expander.expand(&substituted)?)
    }

    /// Evaluates the expression after the last top-level `=` and binds it to
    /// every target before it.
    fn assign(&mut self, number: usize, tokens: Vec<Token>) -> Result<(), EngineError> {
        let (targets, expression) = split_assignment(tokens);
        if expression.is_empty() {
            return Err(EngineError::EmptyExpression);
        }

        let Expansion { tokens, warnings } = self.prepare(&expression)?;
        for warning in warnings {
            self.record_warning(number, &EngineWarning::from(warning));
        }

        let value = match evaluate_infix(&tokens, self.config.converter()) {
            Ok(Evaluation { value, warnings }) => {
                for warning in warnings {
                    self.record_warning(number, &EngineWarning::from(warning));
                }
                Some(value)
            }
            Err(err) => {
                self.record_error(number, &EngineError::from(err));
                None
            }
        };

        if let Some(value) = value {
            for target in targets {
                let name = concat_tokens(&target);
                if target.len() == 1 && is_valid_name(&name) {
                    self.variables.set(&name, value);
                } else {
                    self.record_warning(number, &EngineWarning::InvalidTarget(name));
                }
            }
        }

        self.results.push_back(format_number(value.unwrap_or(0.0)));
        Ok(())
    }

    fn record_error(&mut self, number: usize, err: &EngineError) {
        debug!("statement {} failed: {}", number, err);
        self.errors.push(format!("{number}: {err}"));
    }

    fn record_warning(&mut self, number: usize, warning: &EngineWarning) {
        warn!("statement {}: {}", number, warning);
        self.warnings.push(format!("{number}: {warning}"));
    }
}

/// Splits a statement on its top-level `=` tokens: every segment but the
/// last is an assignment target, the last is the expression.
fn split_assignment(tokens: Vec<Token>) -> (Vec<Vec<Token>>, Vec<Token>) {
    let mut segments = vec![Vec::new()];
    let mut depth = 0usize;
    for token in tokens {
        match token.token_type {
            TokenType::Open(_) => depth += 1,
            TokenType::Close(_) => depth = depth.saturating_sub(1),
            TokenType::Assign if depth == 0 => {
                segments.push(Vec::new());
                continue;
            }
            _ => {}
        }
        if let Some(segment) = segments.last_mut() {
            segment.push(token);
        }
    }
    let expression = segments.pop().unwrap_or_default();
    (segments, expression)
}
