mod assembler;
mod disasm;
mod instruction;
mod op;

pub mod event;
pub mod frame;

pub use assembler::{Assembler, Label};
pub use disasm::Disassembler;
pub use instruction::Instr;
pub use op::{ext, Op};

#[cfg(test)]
mod tests {
    use super::*;

    fn disasm_all(bytes: &[u8]) -> Vec<Instr> {
        Disassembler::new(bytes).map(|(_, i)| i).collect()
    }

    #[test]
    fn canonical_opcode_numbers() {
        assert_eq!(Op::Ret as u8, 0);
        assert_eq!(Op::Lit8 as u8, 1);
        assert_eq!(Op::EventOp as u8, 8);
        assert_eq!(Op::Add as u8, 13);
        assert_eq!(Op::Forget as u8, 41);
        assert_eq!(Op::ResetBoard as u8, 48);
        assert_eq!(Op::Next as u8, 58);
        assert_eq!(Op::Nop as u8, 59);
        assert_eq!(Op::COUNT, 60);
    }

    #[test]
    fn opcode_try_from_rejects_out_of_range() {
        assert_eq!(Op::try_from(59), Ok(Op::Nop));
        assert_eq!(Op::try_from(60), Err(60));
        assert_eq!(Op::try_from(0x80), Err(0x80));
    }

    #[test]
    fn lit_selects_narrow_encoding() {
        let mut a = Assembler::new();
        a.lit(0);
        a.lit(127);
        a.lit(-128);
        a.lit(-1);
        assert_eq!(
            a.as_bytes(),
            [1, 0, 1, 127, 1, 0x80, 1, 0xFF],
            "one-byte literals are sign-extended, so -1 fits"
        );
    }

    #[test]
    fn lit_selects_wide_encoding() {
        let mut a = Assembler::new();
        a.lit(128);
        a.lit(-129);
        a.lit(0x0102);
        assert_eq!(
            a.as_bytes(),
            [2, 0x00, 0x80, 2, 0xFF, 0x7F, 2, 0x01, 0x02],
            "two-byte literals are big-endian"
        );
    }

    #[test]
    fn call_encoding_sets_high_bit() {
        let mut a = Assembler::new();
        a.call(0x0123);
        a.call(0);
        a.call(0x7FFF);
        assert_eq!(a.as_bytes(), [0x81, 0x23, 0x80, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn quote_backpatches_body_length() {
        let mut a = Assembler::new();
        a.quote(|q| {
            q.lit(7);
            q.ret();
        });
        assert_eq!(a.as_bytes(), [3, 3, 1, 7, 0]);
    }

    #[test]
    fn forward_branch_offset_is_relative_to_operand() {
        let mut a = Assembler::new();
        let skip = a.zbranch();
        a.lit(1);
        a.bind(skip);
        a.ret();
        // zbranch operand at offset 1; target (ret) at offset 4.
        assert_eq!(a.as_bytes(), [ext::ZBRANCH, 3, 1, 1, 0]);
    }

    #[test]
    fn backward_branch_reaches_loop_head() {
        let mut a = Assembler::new();
        let top = a.current_offset();
        a.op(Op::Nop);
        a.branch_back(top);
        // Operand at offset 2, target 0, so the offset byte is -2.
        assert_eq!(a.as_bytes(), [Op::Nop as u8, ext::BRANCH, 0xFE]);
    }

    #[test]
    fn next_loop_distance() {
        let mut a = Assembler::new();
        let body = a.current_offset();
        a.op(Op::Inc);
        a.next_loop(body);
        // rel = operand_pos - target - 1 = 2 - 0 - 1; run time does p -= rel + 2.
        assert_eq!(a.as_bytes(), [Op::Inc as u8, Op::Next as u8, 1]);
    }

    #[test]
    fn disassembles_mixed_stream() {
        let mut a = Assembler::new();
        a.lit(3);
        a.lit(300);
        a.op(Op::Add);
        a.call(0x0123);
        a.quote(|q| q.ret());
        a.ret();
        assert_eq!(
            disasm_all(a.as_bytes()),
            vec![
                Instr::Lit8(3),
                Instr::Lit16(300),
                Instr::Prim(Op::Add),
                Instr::Call(0x0123),
                Instr::Quote(1),
                Instr::Prim(Op::Ret),
                Instr::Prim(Op::Ret),
            ]
        );
    }

    #[test]
    fn disassembly_stops_at_truncated_operand() {
        assert_eq!(disasm_all(&[Op::Lit16 as u8, 0x01]), vec![]);
        assert_eq!(disasm_all(&[0x80]), vec![]);
    }

    #[test]
    fn instr_display() {
        assert_eq!(Instr::Lit8(-1).to_string(), "lit8 -1");
        assert_eq!(Instr::Call(0x0123).to_string(), "call 0x0123");
        assert_eq!(Instr::Branch(-2).to_string(), "branch -2");
        assert_eq!(Instr::Prim(Op::ChooseIf).to_string(), "if");
        assert_eq!(Instr::Unbound(100).to_string(), "op[100]");
    }

    #[test]
    fn frame_headers() {
        assert_eq!(frame::immediate(&[1, 2, 3]), vec![0x83, 1, 2, 3]);
        assert_eq!(frame::definition(&[1, 2, 3]), vec![0x03, 1, 2, 3]);
        assert_eq!(frame::immediate(&[]), vec![0x80]);
    }

    #[test]
    fn event_parse_and_scalar_value() {
        let stream = [0, 0xFF, 1, 0x10, 0x07, 2, 0x10, 0x01, 0x2C, 1, 0x10];
        let events = event::parse_events(&stream);
        assert_eq!(events.len(), 3, "trailing partial frame is dropped");
        assert_eq!(events[0].id, 0xFF);
        assert_eq!(events[0].value(), 0);
        assert_eq!(events[1].value(), 7);
        assert_eq!(events[2].value(), 300);
    }

    #[test]
    fn event_one_byte_body_is_signed() {
        let events = event::parse_events(&[1, 0x07, 0xFF]);
        assert_eq!(events[0].value(), -1);
    }
}
