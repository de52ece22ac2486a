use crate::{
    metadata::{
        header::{HEADER_MAGIC, MAJOR_VERSION, MINOR_VERSION},
        strings::is_name,
        validation::Validator,
    },
    Result,
};

impl Validator<'_> {
    /// Header acceptance rules, checked in format order.
    pub(super) fn validate_header(&self) -> Result<()> {
        let header = &self.header;

        if &header.magic != HEADER_MAGIC {
            return Err(invalid_header!("Magic string not found"));
        }

        if header.major_version != MAJOR_VERSION || header.minor_version != MINOR_VERSION {
            return Err(invalid_header!("Version mismatch"));
        }

        if header.n_entries < header.n_local_entries {
            return Err(invalid_header!("Inconsistent entry counts"));
        }

        if u64::from(header.size) != self.data.len() as u64 {
            return Err(invalid_header!("Typelib size mismatch"));
        }

        if let Some(kind) = header.blob_size_mismatch() {
            log::debug!("declared {} record size differs from the format", kind);
            return Err(invalid_header!("Blob size mismatch"));
        }

        if header.directory % 4 != 0 {
            return Err(invalid_header!("Misaligned directory"));
        }

        if header.annotations % 4 != 0 {
            return Err(invalid_header!("Misaligned annotations"));
        }

        if header.annotations == 0 && header.n_annotations > 0 {
            return Err(invalid_header!("Wrong number of annotations"));
        }

        if !is_name(self.data, header.namespace) {
            return Err(invalid_header!("Invalid namespace name"));
        }

        log::debug!(
            "header accepted: {} bytes, {} entries ({} local), {} annotations",
            header.size,
            header.n_entries,
            header.n_local_entries,
            header.n_annotations
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{test::TypelibBuilder, validate, Error, ErrorKind};

    fn header_error(data: &[u8]) -> String {
        match validate(data) {
            Err(Error::InvalidHeader { message, .. }) => message,
            other => panic!("expected an invalid header, got {:?}", other),
        }
    }

    #[test]
    fn magic_and_version() {
        let data = TypelibBuilder::new("Gio").build();

        let mut bad = data.clone();
        bad[3] = b'X';
        assert_eq!(header_error(&bad), "Magic string not found");

        let mut bad = data.clone();
        bad[16] = 2;
        assert_eq!(header_error(&bad), "Version mismatch");

        let mut bad = data;
        bad[17] = 1;
        assert_eq!(header_error(&bad), "Version mismatch");
    }

    #[test]
    fn counts_and_size() {
        let data = TypelibBuilder::new("Gio").build();

        let mut bad = data.clone();
        bad[22] = 1;
        assert_eq!(header_error(&bad), "Inconsistent entry counts");

        let mut bad = data.clone();
        bad.extend_from_slice(&[0; 4]);
        assert_eq!(header_error(&bad), "Typelib size mismatch");

        let mut bad = data;
        bad[56 + 2 * 12] = 9;
        assert_eq!(header_error(&bad), "Blob size mismatch");
    }

    #[test]
    fn alignment_and_annotations() {
        let data = TypelibBuilder::new("Gio").build();

        let mut bad = data.clone();
        bad[24] = 0x66;
        assert_eq!(header_error(&bad), "Misaligned directory");

        let mut bad = data.clone();
        bad[32] = 0x02;
        assert_eq!(header_error(&bad), "Misaligned annotations");

        let mut bad = data;
        bad[32..36].fill(0);
        bad[28] = 1;
        assert_eq!(header_error(&bad), "Wrong number of annotations");
    }

    #[test]
    fn namespace_name() {
        let data = TypelibBuilder::new("Not a name").build();
        assert_eq!(header_error(&data), "Invalid namespace name");

        let data = TypelibBuilder::new("Gtk").build();
        let mut bad = data;
        bad[44..48].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(header_error(&bad), "Invalid namespace name");
    }

    #[test]
    fn too_short() {
        for len in [0, 1, 16, 99] {
            let data = vec![0_u8; len];
            assert_eq!(validate(&data).unwrap_err().kind(), ErrorKind::BufferTooShort);
        }
    }
}
