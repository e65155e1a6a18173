use std::io;

/// Write a hex dump of the given data. The `initial_offset` is
/// what the first byte of the data should be considered as, for printing
/// of offsets.
pub fn hex_dump<W: io::Write>(out: &mut W, data: &[u8], initial_offset: usize) -> io::Result<()> {
    // The output looks like this:
    //      00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F
    //      -----------------------------------------------
    // 0000 01 23 45 67 89 AB CD EF 01 23 45 67 89 AB CD EF  .#Eg.....#Eg....
    if data.is_empty() {
        return Ok(());
    }

    let max_offset = initial_offset + data.len() - 1;
    let num_offset_hex_chars = format!("{max_offset:X}").len().max(4);
    let offset_padding = " ".repeat(num_offset_hex_chars);

    writeln!(
        out,
        "{offset_padding}  00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F"
    )?;
    writeln!(
        out,
        "{offset_padding}  -----------------------------------------------"
    )?;

    let mut remaining_data = data;
    let mut curr_offset = initial_offset;

    while !remaining_data.is_empty() {
        // Lines are aligned to multiples of 16, so the first one may start
        // part way through.
        let line_start = curr_offset % 16;
        let line_length = remaining_data.len().min(16 - line_start);
        let line_end = line_start + line_length;
        let line = &remaining_data[..line_length];

        let line_hex: String = line.iter().map(|b| format!("{b:02X} ")).collect();
        let line_ascii: String = line
            .iter()
            .map(|&b| {
                if (32..=126).contains(&b) {
                    char::from(b)
                } else {
                    '.'
                }
            })
            .collect();

        writeln!(
            out,
            "{:0width$X}  {}{}{} {}{}",
            curr_offset - line_start,
            "   ".repeat(line_start),
            line_hex,
            "   ".repeat(16 - line_end),
            " ".repeat(line_start),
            line_ascii,
            width = num_offset_hex_chars,
        )?;

        remaining_data = &remaining_data[line_length..];
        curr_offset += line_length;
    }
    Ok(())
}
