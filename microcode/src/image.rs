use log::{debug, error, info};
use rayon::prelude::*;

use crate::address::{decode, Address, AddressFields, ADDRESS_SPACE};
use crate::ds::RomHalf;
use crate::error::{GenerateError, WriteFault};
use crate::resolver::{control_word, resolve};
use crate::sink::ByteSink;

/// Physical size of an AT28C64B (8K x 8).
pub(crate) const EEPROM_SIZE: usize = 8192;

/// Where the byte half of each control word comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HalfSelect {
    /// Address pin A7, so both EEPROMs hold the same image.
    Pin,
    /// A7 is ignored and every address holds this half.
    Fixed(RomHalf),
}

impl Default for HalfSelect {
    fn default() -> Self {
        HalfSelect::Pin
    }
}

#[derive(Debug, Default)]
pub(crate) struct GenerationReport {
    /// Control-word bytes written, not counting the zero fill.
    pub(crate) written: usize,
    /// Addresses left at the fill value because their step is never reached.
    pub(crate) skipped: usize,
    pub(crate) faults: Vec<WriteFault>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ImageWriter {
    capacity: usize,
    select: HalfSelect,
}

impl ImageWriter {
    pub(crate) fn new(capacity: usize, select: HalfSelect) -> Result<Self, GenerateError> {
        if capacity < usize::from(ADDRESS_SPACE) {
            return Err(GenerateError::Capacity {
                size: capacity,
                required: usize::from(ADDRESS_SPACE),
            });
        }
        Ok(ImageWriter { capacity, select })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    fn half_for(&self, fields: &AddressFields) -> RomHalf {
        match self.select {
            HalfSelect::Pin => fields.half,
            HalfSelect::Fixed(half) => half,
        }
    }

    fn byte_for(&self, fields: &AddressFields) -> u8 {
        resolve(fields.opcode, fields.step, self.half_for(fields), fields.flags)
    }

    /// Zero-fills the sink up to capacity, then writes the byte of every
    /// reachable address. Failed writes are logged and collected.
    pub(crate) fn generate(&self, sink: &mut dyn ByteSink) -> GenerationReport {
        let mut report = GenerationReport::default();

        // Unused addresses must read as zero on the chip.
        for offset in 0..self.capacity as u64 {
            write_byte(sink, 0, offset, &mut report.faults);
        }

        for address in Address::all() {
            let fields = decode(address);
            if !fields.is_executable() {
                report.skipped += 1;
                continue;
            }
            let value = self.byte_for(&fields);
            let word = control_word(fields.opcode, fields.step, fields.flags);
            debug!(
                target: "rom",
                "Registering instruction {} => {:016b} ({})",
                fields,
                word.bits(),
                word
            );
            if write_byte(sink, value, address.offset(), &mut report.faults) {
                report.written += 1;
            }
        }

        info!(
            "Wrote {} control bytes, skipped {} unreachable addresses, {} write errors",
            report.written,
            report.skipped,
            report.faults.len()
        );
        report
    }

    /// Builds the whole image in memory.
    pub(crate) fn render(&self) -> Vec<u8> {
        let mut image = vec![0u8; self.capacity];
        image[..usize::from(ADDRESS_SPACE)]
            .par_iter_mut()
            .enumerate()
            .for_each(|(raw, byte)| {
                let fields = decode(Address::new(raw as u16));
                if fields.is_executable() {
                    *byte = self.byte_for(&fields);
                }
            });
        image
    }
}

/// Returns false and records a fault if the byte was not fully written.
fn write_byte(sink: &mut dyn ByteSink, value: u8, offset: u64, faults: &mut Vec<WriteFault>) -> bool {
    let fault = match sink.write_at(&[value], offset) {
        Ok(1) => return true,
        Ok(n) => WriteFault::new(offset, value, &format!("wrote {} of 1 bytes", n)),
        Err(e) => WriteFault::new(offset, value, &e.to_string()),
    };
    error!(target: "rom", "{}", fault);
    faults.push(fault);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::encode;
    use crate::ds::{cw, Flags};
    use crate::instruction::Opcode;
    use std::io;

    fn writer() -> ImageWriter {
        ImageWriter::new(EEPROM_SIZE, HalfSelect::Pin).unwrap()
    }

    fn at(step: u8, opcode: Opcode, half: RomHalf, flags: Flags) -> usize {
        encode(&AddressFields {
            step,
            opcode,
            half,
            flags,
        })
        .raw() as usize
    }

    /// Fails every write to the offsets it was given.
    struct FaultySink {
        inner: Vec<u8>,
        broken: Vec<u64>,
        short: bool,
    }

    impl ByteSink for FaultySink {
        fn write_at(&mut self, bytes: &[u8], offset: u64) -> io::Result<usize> {
            if self.broken.contains(&offset) {
                if self.short {
                    return Ok(0);
                }
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            self.inner.write_at(bytes, offset)
        }
    }

    #[test]
    fn test_image_is_eeprom_sized() {
        let mut sink: Vec<u8> = Vec::new();
        let report = writer().generate(&mut sink);
        assert_eq!(sink.len(), 8192);
        assert_eq!(writer().render().len(), 8192);
        assert!(report.faults.is_empty());
        assert_eq!(report.written, 16 * 6 * 2 * 4);
        assert_eq!(report.skipped, 16 * 2 * 2 * 4);
    }

    #[test]
    fn test_rejects_small_capacity() {
        let err = ImageWriter::new(1000, HalfSelect::Pin).unwrap_err();
        assert!(matches!(err, GenerateError::Capacity { size: 1000, required: 1024 }));
        assert!(ImageWriter::new(1024, HalfSelect::Pin).is_ok());
    }

    #[test]
    fn test_fetch_bytes_in_image() {
        let image = writer().render();
        let fetch = cw!(MI | CO);
        for op in Opcode::ALL.iter() {
            assert_eq!(image[at(0, *op, RomHalf::Low, Flags::empty())], fetch.low_byte());
            assert_eq!(image[at(0, *op, RomHalf::High, Flags::empty())], fetch.high_byte());
        }
        assert_eq!(image[0], 0);
        assert_eq!(image[0b1000_0000], 0b0100_0010);
    }

    #[test]
    fn test_unreachable_steps_stay_zero() {
        let image = writer().render();
        for address in Address::all() {
            let fields = decode(address);
            if fields.step >= 6 {
                assert_eq!(image[address.raw() as usize], 0, "address {}", address);
            }
        }
        assert!(image[usize::from(ADDRESS_SPACE)..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_generate_matches_render() {
        let mut sink: Vec<u8> = Vec::new();
        writer().generate(&mut sink);
        assert_eq!(sink, writer().render());
    }

    #[test]
    fn test_overwrites_stale_contents() {
        let mut sink = vec![0xFFu8; EEPROM_SIZE];
        writer().generate(&mut sink);
        assert_eq!(sink, writer().render());
    }

    #[test]
    fn test_conditional_jump_bytes() {
        let image = writer().render();
        let jump = cw!(IO | J);
        assert_eq!(image[at(2, Opcode::Jz, RomHalf::High, Flags::ZERO)], jump.high_byte());
        assert_eq!(image[at(2, Opcode::Jz, RomHalf::High, Flags::empty())], 0);
        assert_eq!(image[at(2, Opcode::Jnz, RomHalf::High, Flags::ZERO)], 0);
        assert_eq!(image[at(2, Opcode::Jc, RomHalf::Low, Flags::CARRY)], jump.low_byte());
        assert_eq!(image[at(2, Opcode::Jnc, RomHalf::Low, Flags::CARRY)], 0);
    }

    #[test]
    fn test_fixed_half_ignores_select_pin() {
        let high = ImageWriter::new(EEPROM_SIZE, HalfSelect::Fixed(RomHalf::High))
            .unwrap()
            .render();
        let low = ImageWriter::new(EEPROM_SIZE, HalfSelect::Fixed(RomHalf::Low))
            .unwrap()
            .render();
        let both = writer().render();
        for address in Address::all() {
            let fields = decode(address);
            let mut as_high = fields;
            as_high.half = RomHalf::High;
            let mut as_low = fields;
            as_low.half = RomHalf::Low;
            let raw = address.raw() as usize;
            assert_eq!(high[raw], both[encode(&as_high).raw() as usize]);
            assert_eq!(low[raw], both[encode(&as_low).raw() as usize]);
        }
    }

    #[test]
    fn test_write_errors_do_not_stop_generation() {
        let hlt = at(2, Opcode::Hlt, RomHalf::High, Flags::empty()) as u64;
        let mut sink = FaultySink {
            inner: Vec::new(),
            broken: vec![hlt, 5000],
            short: false,
        };
        let report = writer().generate(&mut sink);
        assert_eq!(report.faults.len(), 3);
        assert_eq!(report.faults[0].offset, hlt);
        assert_eq!(report.faults[0].value, 0);
        assert_eq!(report.faults[1].offset, 5000);
        assert_eq!(report.faults[2].offset, hlt);
        assert_eq!(report.faults[2].value, 0b1000_0000);
        assert_eq!(report.faults[2].reason, "disk on fire");
        assert_eq!(report.written, 16 * 6 * 2 * 4 - 1);
        assert_eq!(sink.inner.len(), 8192);
    }

    #[test]
    fn test_short_write_is_a_fault() {
        let mut sink = FaultySink {
            inner: Vec::new(),
            broken: vec![0x80],
            short: true,
        };
        let report = writer().generate(&mut sink);
        assert_eq!(report.faults.len(), 2);
        assert_eq!(report.faults[1].reason, "wrote 0 of 1 bytes");
        assert_eq!(report.faults[1].value, cw!(MI | CO).high_byte());
    }
}
