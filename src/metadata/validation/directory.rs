use crate::{
    metadata::{
        blobs::{ensure_room, read_at},
        directory::{BlobType, DirEntry},
        layout::{annotation, common, dir_entry},
        strings::is_name,
        validation::Validator,
    },
    Result,
};

impl Validator<'_> {
    /// Walk the directory and dispatch every local entry to its record validator.
    pub(super) fn validate_directory(&self) -> Result<()> {
        let n_entries = self.header.n_entries;

        // An empty directory occupies no bytes, its offset is irrelevant
        if n_entries == 0 {
            return Ok(());
        }

        ensure_room(
            self.data,
            self.header.directory as usize,
            usize::from(n_entries) * dir_entry::SIZE,
        )?;

        for index in 1..=n_entries {
            let entry = DirEntry::read(self.data, self.header.directory, index)?;

            if !is_name(self.data, entry.name) {
                return Err(invalid_directory!("Invalid entry name"));
            }

            if (entry.local && entry.blob_type == BlobType::Invalid as u16)
                || entry.blob_type > BlobType::MAX
            {
                return Err(invalid_directory!("Invalid entry type"));
            }

            if index <= self.header.n_local_entries {
                if !entry.local {
                    return Err(invalid_directory!("Too few local directory entries"));
                }

                if entry.offset % 4 != 0 {
                    return Err(invalid_directory!("Misaligned entry"));
                }

                self.validate_blob(&entry)?;
            } else {
                if entry.local {
                    return Err(invalid_directory!("Too many local directory entries"));
                }

                if !is_name(self.data, entry.offset) {
                    return Err(invalid_directory!("Invalid namespace name"));
                }
            }
        }

        log::debug!("directory accepted: {} entries", n_entries);
        Ok(())
    }

    /// Dispatch a local entry to the validator of its kind.
    fn validate_blob(&self, entry: &DirEntry) -> Result<()> {
        let offset = entry.offset as usize;
        ensure_room(self.data, offset, common::SIZE)?;

        let head = read_at::<u16>(self.data, offset, common::BLOB_TYPE)?;
        match BlobType::from_raw(head) {
            None | Some(BlobType::Invalid) => return Err(invalid_entry!("Invalid blob type")),
            Some(_) if head != entry.blob_type => return Err(invalid_blob!("Wrong blob type")),
            Some(_) => {}
        }

        let Some(kind) = entry.kind() else {
            return Err(invalid_entry!("Invalid blob type"));
        };

        log::trace!(
            "validating {} entry {} at offset {:#x}",
            kind,
            entry.index,
            offset
        );

        match kind {
            BlobType::Function => self.validate_function(offset, None),
            BlobType::Callback => self.validate_callback(offset),
            BlobType::Struct | BlobType::Boxed => self.validate_struct(offset, kind),
            BlobType::Enum | BlobType::Flags => self.validate_enum(offset, kind),
            BlobType::Object => self.validate_object(offset),
            BlobType::Interface => self.validate_interface(offset),
            BlobType::Constant => self.validate_constant(offset),
            BlobType::ErrorDomain => self.validate_error_domain(offset),
            BlobType::Union => self.validate_union(offset),
            BlobType::Invalid => Err(invalid_entry!("Invalid blob type")),
        }
    }

    /// The annotation table must fit into the buffer.
    ///
    /// An empty table occupies no bytes, so its offset is not range-checked.
    pub(super) fn validate_annotations(&self) -> Result<()> {
        let n_annotations = self.header.n_annotations as usize;
        if n_annotations == 0 {
            return Ok(());
        }

        let end = n_annotations
            .checked_mul(annotation::SIZE)
            .and_then(|table| (self.header.annotations as usize).checked_add(table));

        match end {
            Some(end) if end <= self.header.size as usize => Ok(()),
            _ => Err(too_short!()),
        }
    }
}
