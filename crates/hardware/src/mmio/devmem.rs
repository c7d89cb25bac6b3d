//! `/dev/mem` register window.
//!
//! Maps the physical address range of the FPGA component into the process with `mmap` and
//! serves volatile 32-bit loads and stores through the mapping. The mapping borrows the open
//! device, so the descriptor cannot be closed while a window is still mapped. Dropping a
//! [`MappedRegion`] unmaps it; [`MappedRegion::unmap`] does the same but reports failure.

use std::fs::{File, OpenOptions};
use std::io;
use std::marker::PhantomData;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::ptr;

use super::traits::{RegisterIo, byte_offset};
use crate::common::addr::WORD_BYTES;
use crate::common::{Error, PhysAddr};

/// Fallback when `sysconf(_SC_PAGESIZE)` fails.
const FALLBACK_PAGE_SIZE: usize = 4096;

/// Open handle to the physical memory device.
#[derive(Debug)]
pub struct DevMem {
    file: File,
    path: PathBuf,
}

impl DevMem {
    /// Default physical memory device.
    pub const DEFAULT_PATH: &'static str = "/dev/mem";

    /// Opens `path` read/write with `O_SYNC` so stores reach the bus uncached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceOpenFailed`] with the OS error (typically `EACCES` without root).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(&path)
            .map_err(|source| Error::DeviceOpenFailed {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("opened {}", path.display());
        Ok(Self { file, path })
    }

    /// Returns the device path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maps `span` bytes of physical memory starting at `base`.
    ///
    /// `base` need not be page aligned; the mapping is widened down to the page boundary and
    /// the returned window starts at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MapFailed`] if `mmap` fails, if `span` is zero, or if `base` is not
    /// word aligned.
    pub fn map(&self, base: PhysAddr, span: usize) -> Result<MappedRegion<'_>, Error> {
        if span == 0 || base.val() % WORD_BYTES != 0 {
            return Err(Error::MapFailed {
                base,
                span,
                source: io::Error::from_raw_os_error(libc::EINVAL),
            });
        }

        let page_size = page_size();
        let page_offset = (base.val() % page_size as u64) as usize;
        let map_base = base.val() - page_offset as u64;
        let map_len = span + page_offset;

        // SAFETY: a fresh shared mapping of the device; the kernel picks the address and
        // validates the offset and length.
        let map_ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                map_len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                self.file.as_raw_fd(),
                map_base as libc::off_t,
            )
        };
        if map_ptr == libc::MAP_FAILED {
            return Err(Error::MapFailed {
                base,
                span,
                source: io::Error::last_os_error(),
            });
        }

        // SAFETY: page_offset < map_len, so the window start lies inside the mapping.
        let window = unsafe { map_ptr.cast::<u8>().add(page_offset) };
        tracing::debug!("mapped {span:#x} bytes at {base} (page base {map_base:#x})");

        Ok(MappedRegion {
            map_ptr,
            map_len,
            window,
            span,
            base,
            released: false,
            _device: PhantomData,
        })
    }
}

/// A mapped register window; unmapped on drop.
#[derive(Debug)]
pub struct MappedRegion<'dev> {
    /// Page-aligned pointer returned by `mmap`.
    map_ptr: *mut libc::c_void,
    /// Length passed to `mmap`.
    map_len: usize,
    /// First byte of the component window.
    window: *mut u8,
    span: usize,
    base: PhysAddr,
    released: bool,
    _device: PhantomData<&'dev DevMem>,
}

impl MappedRegion<'_> {
    /// Physical address of the first byte of the window.
    pub fn base(&self) -> PhysAddr {
        self.base
    }

    /// Unmaps the window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnmapFailed`] with the OS error if `munmap` fails.
    pub fn unmap(mut self) -> Result<(), Error> {
        self.release()
    }

    fn release(&mut self) -> Result<(), Error> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        // SAFETY: map_ptr/map_len are exactly what mmap returned and the mapping has not
        // been released yet.
        let rc = unsafe { libc::munmap(self.map_ptr, self.map_len) };
        if rc != 0 {
            return Err(Error::UnmapFailed {
                source: io::Error::last_os_error(),
            });
        }
        tracing::debug!("unmapped {:#x} bytes at {}", self.span, self.base);
        Ok(())
    }
}

impl Drop for MappedRegion<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!("{err}");
        }
    }
}

impl RegisterIo for MappedRegion<'_> {
    fn span(&self) -> usize {
        self.span
    }

    fn read_word(&self, offset: u32) -> Result<u32, Error> {
        let byte = byte_offset(offset, self.span)?;
        // SAFETY: byte_offset keeps the word inside the window, and the window start is word
        // aligned because base is word aligned and mmap returns page-aligned memory.
        Ok(unsafe { ptr::read_volatile(self.window.add(byte).cast::<u32>()) })
    }

    fn write_word(&mut self, offset: u32, value: u32) -> Result<(), Error> {
        let byte = byte_offset(offset, self.span)?;
        // SAFETY: see read_word.
        unsafe { ptr::write_volatile(self.window.add(byte).cast::<u32>(), value) };
        Ok(())
    }
}

/// Host page size in bytes.
fn page_size() -> usize {
    // SAFETY: sysconf has no preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as usize
    } else {
        FALLBACK_PAGE_SIZE
    }
}
