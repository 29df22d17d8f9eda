//! Reassemble newline-delimited commands from fragmented serial input.
//!
//! Bytes arrive in arbitrary chunks, as from a UART interrupt, and are pushed
//! into a 64-byte ring with `push_string`. Carriage returns and control bytes
//! are dropped at insertion by a `Filter` strategy. Complete lines are popped
//! as C strings with `pop_cstring_until`.
//!
//! Run with: RUST_LOG=trace cargo run --example line_assembler

use maskring_rs::{Filter, OnMatch, RingBuffer};

const LINE_MAX: usize = 24;

fn main() {
    env_logger::init();

    println!("maskring line assembler");
    println!("=======================\n");

    let printable = Filter(|b: &u8| *b == b'\n' || b.is_ascii_graphic() || *b == b' ');
    let mut rx: RingBuffer<u8, 64, _> = RingBuffer::with_strategy(printable);

    let chunks: [&[u8]; 6] = [
        b"AT\r\nAT+GM",
        b"R\r\nAT+CSQ",
        b"\r\n\x07AT+C",
        b"OPS?\r\n",
        b"   AT+CREG?\r\n",
        b"AT+PARTIAL",
    ];

    for chunk in chunks {
        let accepted = rx.push_string(chunk);
        println!("rx {:>2} bytes, kept {:>2}, buffered {:>2}/{}", chunk.len(), accepted, rx.count(), rx.capacity());
        drain_lines(&mut rx);
    }

    let mut rest = [0u8; LINE_MAX];
    let n = rx.pop_cstring_cond(&mut rest, |b| *b == b' ', OnMatch::Skip);
    println!("\nunterminated tail: {:?}", String::from_utf8_lossy(&rest[..n]));
}

fn drain_lines<S>(rx: &mut RingBuffer<u8, 64, S>)
where
    S: maskring_rs::InsertStrategy<u8>,
{
    while rx.iter().any(|b| *b == b'\n') {
        let mut line = [0u8; LINE_MAX];
        let n = rx.pop_cstring_until(&mut line, &b'\n');
        let text = String::from_utf8_lossy(&line[..n]);
        let text = text.trim();
        if !text.is_empty() {
            println!("  command: {text}");
        }
    }
}
