#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

pub fn write_label(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write label file");
}

/// Creates the four split directories under `root`.
pub fn create_layout(root: &Path) {
    for dir in ["images/train", "images/val", "labels/train", "labels/val"] {
        fs::create_dir_all(root.join(dir)).expect("create split dir");
    }
}

/// A small dataset with no findings: two train samples and one val sample.
pub fn create_valid_dataset(root: &Path) {
    create_layout(root);

    write_bmp(&root.join("images/train/img_a.bmp"), 20, 16);
    write_bmp(&root.join("images/train/img_b.bmp"), 12, 12);
    write_bmp(&root.join("images/val/img_c.bmp"), 32, 32);

    write_label(
        &root.join("labels/train/img_a.txt"),
        "0 0.5 0.5 0.4 0.4\n0 0.2 0.3 0.1 0.2\n",
    );
    write_label(&root.join("labels/train/img_b.txt"), "0 0.5 0.5 0.5 0.5\n");
    write_label(&root.join("labels/val/img_c.txt"), "0 0.25 0.75 0.5 0.5\n");
}
