//! Step compiler: recursive descent over the input step tree.
//!
//! Steps are numbered in pre-order with one counter shared by the whole
//! tree. A repeat group takes its own slot before its children, and the
//! counter is never reset between siblings or nesting levels.

use crate::end_condition::resolve_end_condition;
use crate::tables;
use crate::target::resolve_target;
use crate::{CompiledStep, Error, ExecutableStep, RepeatGroup, Result, StepSpec};

/// Ceilings that keep untrusted input from growing without bound
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Deepest allowed nesting; top-level steps are depth 1
    pub max_depth: usize,
    /// Most compiled steps (leaves and repeat groups) in one workout
    pub max_steps: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_steps: 1000,
        }
    }
}

/// Compilation cursor owned by a single compile call
pub struct StepCompiler<'a> {
    options: &'a CompileOptions,
    next_order: u32,
    compiled: usize,
}

impl<'a> StepCompiler<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            next_order: 1,
            compiled: 0,
        }
    }

    /// Order that the next compiled step will receive
    pub fn next_order(&self) -> u32 {
        self.next_order
    }

    /// Compile a top-level step list
    pub fn compile(&mut self, steps: &[StepSpec]) -> Result<Vec<CompiledStep>> {
        self.compile_steps(steps, 1)
    }

    fn compile_steps(&mut self, steps: &[StepSpec], depth: usize) -> Result<Vec<CompiledStep>> {
        if depth > self.options.max_depth {
            return Err(Error::MalformedInput(format!(
                "steps nested deeper than {} levels",
                self.options.max_depth
            )));
        }
        steps
            .iter()
            .map(|step| self.compile_step(step, depth))
            .collect()
    }

    fn compile_step(&mut self, step: &StepSpec, depth: usize) -> Result<CompiledStep> {
        self.compiled += 1;
        if self.compiled > self.options.max_steps {
            return Err(Error::MalformedInput(format!(
                "workout has more than {} steps",
                self.options.max_steps
            )));
        }

        if step.is_repeat() {
            return self.compile_repeat(step, depth);
        }

        match step.step_type.as_deref() {
            None => Err(Error::MissingStepType(step.display_name().to_string())),
            Some(kind) => self.compile_leaf(step, kind),
        }
    }

    fn compile_leaf(&mut self, step: &StepSpec, kind: &str) -> Result<CompiledStep> {
        let step_type = tables::step_type_or_interval(kind);
        let end = resolve_end_condition(step)?;
        let target = resolve_target(step.target.as_ref())?;
        let order = self.take_order();

        Ok(CompiledStep::Executable(ExecutableStep {
            step_id: order,
            step_order: order,
            step_type,
            end_condition: end.end_condition,
            end_condition_value: end.value,
            preferred_end_condition_unit: end.preferred_unit,
            description: step.step_description.clone().unwrap_or_default(),
            step_audio_note: None,
            target_type: target.target_type,
            target_value_one: target.value_one,
            target_value_two: target.value_two,
            target_value_unit: target.value_unit,
        }))
    }

    fn compile_repeat(&mut self, step: &StepSpec, depth: usize) -> Result<CompiledStep> {
        let iterations = iteration_count(step)?;
        let order = self.take_order();
        let children = step.steps.as_deref().unwrap_or_default();
        let workout_steps = self.compile_steps(children, depth + 1)?;

        Ok(CompiledStep::Repeat(RepeatGroup {
            step_id: order,
            step_order: order,
            step_type: tables::repeat_step_type(),
            number_of_iterations: iterations,
            smart_repeat: false,
            end_condition: tables::ITERATIONS,
            workout_steps,
        }))
    }

    fn take_order(&mut self) -> u32 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }
}

/// `numberOfIterations` as a positive whole number
fn iteration_count(step: &StepSpec) -> Result<u32> {
    match step.number_of_iterations {
        Some(n) if n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => Ok(n as u32),
        _ => Err(Error::InvalidIterationCount(step.display_name().to_string())),
    }
}
