//! # Source Emission
//!
//! Writes the packed palette and the serialised textures as literal C source
//! text. The renderer compiles this output directly, so the framing, the
//! lowercase hex and the trailing separators are all part of the contract.

use std::io::{self, Write};

use crate::palette::PACKED_PALETTE_LEN;
use crate::triangle::CubeTexture;

/// Writes the `uint16_t tex_palette[256] {...};` block
pub fn write_palette_table(
    out: &mut impl Write,
    packed: &[u16; PACKED_PALETTE_LEN],
) -> io::Result<()> {
    write!(out, "\n\nuint16_t tex_palette[{}] {{", packed.len())?;
    for value in packed {
        write!(out, "{:#x}, ", value)?;
    }
    write!(out, "}};\n\n\n")?;

    Ok(())
}

/// Writes the `Texture_t textures[N] = {...};` block, six triangles per cube
pub fn write_texture_table(out: &mut impl Write, textures: &[CubeTexture]) -> io::Result<()> {
    write!(out, "\n\nTexture_t textures[{}] =\n{{", textures.len())?;

    for texture in textures {
        write!(out, "\n    {{")?;
        for triangle in &texture.triangles {
            write!(out, "{{")?;
            for index in triangle {
                write!(out, "{:#x}, ", index)?;
            }
            write!(out, "}}, ")?;
        }
        write!(out, "}},")?;
    }

    write!(out, "\n}};\n\n\n")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::{CUBE_TRIANGLES, TRIANGLE_LEN};

    #[test]
    fn palette_table_is_emitted_byte_for_byte() {
        let mut packed = [0u16; PACKED_PALETTE_LEN];
        packed[0] = 0x63df;
        packed[1] = 0x7fff;

        let mut buffer = Vec::new();
        write_palette_table(&mut buffer, &packed).unwrap();

        let expected = format!(
            "\n\nuint16_t tex_palette[256] {{0x63df, 0x7fff, {}}};\n\n\n",
            "0x0, ".repeat(254)
        );
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn texture_table_is_emitted_byte_for_byte() {
        let cube = CubeTexture {
            triangles: [[0u16; TRIANGLE_LEN]; CUBE_TRIANGLES],
        };

        let mut buffer = Vec::new();
        write_texture_table(&mut buffer, &[cube]).unwrap();

        let triangle = format!("{{{}}}, ", "0x0, ".repeat(TRIANGLE_LEN));
        let expected = format!(
            "\n\nTexture_t textures[1] =\n{{\n    {{{}}},\n}};\n\n\n",
            triangle.repeat(CUBE_TRIANGLES)
        );
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn empty_texture_list_still_emits_the_frame() {
        let mut buffer = Vec::new();
        write_texture_table(&mut buffer, &[]).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "\n\nTexture_t textures[0] =\n{\n};\n\n\n"
        );
    }
}
