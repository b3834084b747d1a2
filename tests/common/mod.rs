use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

pub struct PhotoTrees {
    pub source: ChildPath,
    pub dest: ChildPath,
}

/// Create empty `raws/` and `edits/` roots inside `temp_dir`.
pub fn setup_photo_trees(temp_dir: &TempDir) -> PhotoTrees {
    let source = temp_dir.child("raws");
    let dest = temp_dir.child("edits");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();
    PhotoTrees { source, dest }
}

/// `editcount run` against the given trees, with outputs landing in `temp_dir`.
pub fn run_command(temp_dir: &TempDir, trees: &PhotoTrees) -> Command {
    let mut cmd = Command::cargo_bin("editcount").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("PHOTO_SOURCE_DIR")
        .env_remove("PHOTO_DEST_DIR")
        .arg("run")
        .arg("--source-dir")
        .arg(trees.source.path())
        .arg("--dest-dir")
        .arg(trees.dest.path());
    cmd
}
