// fuzz_targets/lexer.rs
#![no_main]

use g5_front::lexer::{Lexer, TokenKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Lossy decode, the same way files are read.
    let s = String::from_utf8_lossy(data);

    let mut lx = Lexer::new(&s);
    let mut last_end = 0usize;
    let mut steps = 0usize;
    let max_steps = s.len().saturating_mul(2) + 8;

    loop {
        let tok = match lx.next_token() {
            Ok(tok) => tok,
            Err(e) => {
                assert!(e.span.end as usize <= s.len());
                break;
            }
        };
        if tok.kind == TokenKind::Eof {
            assert_eq!(tok.span.start as usize, s.len());
            assert_eq!(lx.next_token().map(|t| t.kind), Ok(TokenKind::Eof));
            break;
        }

        let (start, end) = (tok.span.start as usize, tok.span.end as usize);
        assert!(start < end && end <= s.len());
        assert!(start >= last_end);
        if tok.is_inserted_terminator() {
            assert_eq!(tok.text, "\n");
        }
        last_end = end;

        steps += 1;
        assert!(steps <= max_steps);
    }

    // Header reader must not panic on anything the lexer accepts or rejects.
    let _ = g5_front::parse_source(&s);
});
