use crate::val::{Slot, Value, render_slot};
use crate::vm::{Instruction, Memory, Stack, VmError};

use super::Control;
use super::helpers::{int_to_bool, pop_ints};
use super::{math, strings};

impl Instruction {
    /// Execute against the runner, stack and memory.
    pub fn exec(&self, ctrl: &mut dyn Control, stack: &mut Stack<Slot>, mem: &mut dyn Memory) -> Result<(), VmError> {
        match self {
            Instruction::Label(_) => Ok(()),
            Instruction::Jump(label) => ctrl.jump(*label),
            Instruction::JumpIfNonZero(label) => {
                let [cond] = pop_ints::<1>(stack)?;
                if int_to_bool(cond) { ctrl.jump(*label) } else { Ok(()) }
            }
            Instruction::JumpIfZero(label) => {
                let [cond] = pop_ints::<1>(stack)?;
                if int_to_bool(cond) { Ok(()) } else { ctrl.jump(*label) }
            }
            Instruction::Stop => {
                ctrl.stop();
                Ok(())
            }

            Instruction::Add => math::int_binop(stack, |a, b| Ok(a.wrapping_add(b))),
            Instruction::Subtract => math::int_binop(stack, |a, b| Ok(a.wrapping_sub(b))),
            Instruction::Multiply => math::int_binop(stack, |a, b| Ok(a.wrapping_mul(b))),
            Instruction::Divide => math::int_binop(stack, |a, b| {
                if b == 0 {
                    return Err(VmError::DivisionByZero);
                }
                Ok(a.wrapping_div(b))
            }),

            Instruction::Equal => math::equal(stack),
            Instruction::GreaterThan => math::int_binop(stack, |a, b| Ok((a > b).into())),
            Instruction::LessThan => math::int_binop(stack, |a, b| Ok((a < b).into())),

            Instruction::PushInt(v) => {
                stack.push(Some(Value::Int(*v)));
                Ok(())
            }
            Instruction::PushString(s) => {
                stack.push(Some(Value::Str(s.clone())));
                Ok(())
            }
            Instruction::StoreMemory(addr) => {
                let value = stack.pop()?;
                mem.store(*addr, value);
                Ok(())
            }
            Instruction::LoadMemory(addr) => {
                stack.push(mem.load(*addr));
                Ok(())
            }
            Instruction::Output(addr) => {
                ctrl.emit(&render_slot(&mem.load(*addr)));
                Ok(())
            }

            Instruction::ConcatString => strings::concat(stack),
            Instruction::StringLength => strings::length(stack),
            Instruction::FormatString(template) => strings::format(stack, template),
        }
    }
}
