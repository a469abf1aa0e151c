//! The pager: owns the backing file, demand-pages 4096-byte pages into a
//! fixed-size cache, and writes everything back on close.
//!
//! There is no eviction and no free list. At 100 pages the database caps
//! out at 400 KiB, so the cache can simply hold every page the file will
//! ever have; pages are faulted in lazily and flushed once, at `close()`.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use crate::error::{Result, StorageError};
use crate::page::{new_page, Page, PAGE_SIZE};

/// Hard cap on the number of pages a single database file may have.
pub const MAX_PAGES: usize = 100;

pub struct Pager {
    file: File,
    pages: Vec<Option<Box<Page>>>,
    num_pages: u32,
}

impl Pager {
    /// Open (creating if absent) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path.as_ref())?;

        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(StorageError::CorruptFileLength);
        }
        let num_pages = (file_length / PAGE_SIZE as u64) as u32;

        debug!("opened pager: {} existing page(s)", num_pages);

        let mut pages = Vec::with_capacity(MAX_PAGES);
        pages.resize_with(MAX_PAGES, || None);

        Ok(Self {
            file,
            pages,
            num_pages,
        })
    }

    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// The next untouched page number. The caller materializes the slot by
    /// calling `get_page` on the returned index.
    pub fn allocate_new_page(&self) -> u32 {
        self.num_pages
    }

    /// Fault `page_num` into the cache if it isn't already there, reading
    /// its bytes from disk when they exist, and return a mutable view.
    pub fn get_page(&mut self, page_num: u32) -> Result<&mut Page> {
        if page_num as usize >= MAX_PAGES {
            return Err(StorageError::PageNumberOutOfBounds(page_num, MAX_PAGES as u32));
        }

        if self.pages[page_num as usize].is_none() {
            let mut page = new_page();
            if page_num < self.num_pages {
                self.file.seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
                // The tail page of a file may be short if the file was ever
                // truncated externally; read_exact would reject a partial
                // read, so read what's there and leave the rest zeroed.
                let mut read = 0usize;
                loop {
                    match self.file.read(&mut page[read..])? {
                        0 => break,
                        n => read += n,
                    }
                }
            }
            self.pages[page_num as usize] = Some(page);
        }

        if page_num >= self.num_pages {
            self.num_pages = page_num + 1;
        }

        Ok(self.pages[page_num as usize].as_mut().unwrap())
    }

    /// Write the full 4096-byte page back to its slot in the file.
    pub fn flush(&mut self, page_num: u32) -> Result<()> {
        let page = self.pages[page_num as usize]
            .as_ref()
            .ok_or(StorageError::FlushNullPage)?;

        self.file.seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(page.as_ref())?;
        Ok(())
    }

    /// Flush every cached page and drop the file handle.
    pub fn close(&mut self) -> Result<()> {
        let num_pages = self.num_pages;
        for page_num in 0..num_pages {
            if self.pages[page_num as usize].is_some() {
                self.flush(page_num)?;
                self.pages[page_num as usize] = None;
            }
        }
        // Defensive: free any stray pages faulted in beyond num_pages.
        for slot in self.pages.iter_mut() {
            *slot = None;
        }
        self.file.flush()?;
        Ok(())
    }
}
