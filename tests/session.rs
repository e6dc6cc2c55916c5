use std::fs;

use cordon::core::{Config, Session};
use cordon::path::Sandbox;
use tempfile::TempDir;

fn setup_session() -> (TempDir, Session) {
    let temp_dir = TempDir::new().unwrap();
    let sandbox = Sandbox::new(temp_dir.path()).unwrap();
    (temp_dir, Session::new(sandbox, &Config::default()))
}

fn output(session: &mut Session, line: &str) -> String {
    session.run(line).unwrap().output
}

#[test]
fn natural_language_round_trip() {
    let (temp_dir, mut session) = setup_session();

    let reply = session.run("make a directory inbox").unwrap();
    assert_eq!(reply.command, "mkdir inbox");
    assert_eq!(reply.output, "Folder created: inbox");

    session.run("echo hello > inbox/note.txt").unwrap();

    let reply = session.run("move file inbox/note.txt to archived.txt").unwrap();
    assert_eq!(reply.command, "mv inbox/note.txt archived.txt");
    assert!(temp_dir.path().join("archived.txt").is_file());

    let reply = session.run("copy archived.txt to inbox").unwrap();
    assert_eq!(reply.command, "cp archived.txt inbox");
    assert!(temp_dir.path().join("inbox/archived.txt").is_file());

    let reply = session.run("open file archived.txt").unwrap();
    assert_eq!(reply.command, "cat archived.txt");
    assert_eq!(reply.output, "hello\n");

    let reply = session.run("delete folder inbox").unwrap();
    assert_eq!(reply.command, "rm -r inbox");
    assert!(!temp_dir.path().join("inbox").exists());
}

#[test]
fn cd_chain_never_leaves_root() {
    let (_temp_dir, mut session) = setup_session();
    let root = session.sandbox().root().to_path_buf();

    session.run("mkdir a/b/c").unwrap();
    session.run("cd a/b/c").unwrap();
    assert_eq!(session.cwd(), root.join("a/b/c"));

    for line in ["cd ../../../..", "cd /", "cd ~", "cd ../../../../.."] {
        let reply = session.run(line).unwrap();
        assert!(reply.failed, "{}", line);
        assert_eq!(session.cwd(), root.join("a/b/c"));
    }

    session.run("cd ../../..").unwrap();
    assert_eq!(session.cwd(), root);
    assert_eq!(output(&mut session, "pwd"), root.to_string_lossy());
}

#[test]
fn transcript_keeps_typed_lines_in_order() {
    let (_temp_dir, mut session) = setup_session();

    session.run("create folder logs").unwrap();
    assert!(session.run("").is_none());
    session.run("ls").unwrap();

    assert_eq!(session.history(), ["create folder logs", "ls"]);
    assert_eq!(
        session.transcript(),
        "$ create folder logs\nFolder created: logs\n\n$ ls\nlogs/\n\n"
    );
}

#[test]
fn mkdir_is_idempotent() {
    let (_temp_dir, mut session) = setup_session();

    assert_eq!(output(&mut session, "mkdir same"), "Folder created: same");
    assert_eq!(output(&mut session, "mkdir same"), "Folder created: same");
    assert_eq!(output(&mut session, "ls"), "same/");
}

#[test]
fn echo_then_cat() {
    let (_temp_dir, mut session) = setup_session();

    assert_eq!(output(&mut session, "echo 'two  spaces' > t.txt"), "Wrote to t.txt");
    assert_eq!(output(&mut session, "cat t.txt"), "two  spaces\n");
    assert_eq!(output(&mut session, "echo plain words"), "plain words");
}

#[test]
fn ls_all_shows_hidden_entries() {
    let (_temp_dir, mut session) = setup_session();

    session.run("touch .secret").unwrap();
    session.run("touch visible").unwrap();

    assert_eq!(output(&mut session, "ls"), "visible");
    assert_eq!(output(&mut session, "ls -a"), ".secret\nvisible");
}

#[test]
fn cp_into_existing_directory_keeps_name() {
    let (temp_dir, mut session) = setup_session();

    session.run("mkdir dest").unwrap();
    session.run("echo data > src.txt").unwrap();

    assert_eq!(output(&mut session, "cp src.txt dest"), "Copied src.txt -> dest");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("dest/src.txt")).unwrap(),
        "data\n"
    );
    assert!(temp_dir.path().join("src.txt").exists());
}

#[test]
fn aliases_expand_before_translation() {
    let temp_dir = TempDir::new().unwrap();
    let rc = temp_dir.path().join("rc");
    fs::write(&rc, "alias new='create folder'\n").unwrap();
    let mut config = Config::with_file(&rc);
    config.load().unwrap();

    let mut session = Session::new(Sandbox::new(temp_dir.path()).unwrap(), &config);
    let reply = session.run("new drafts").unwrap();

    assert!(reply.translated);
    assert_eq!(reply.command, "mkdir drafts");
    assert!(temp_dir.path().join("drafts").is_dir());
}

#[test]
fn escapes_leave_outside_untouched() {
    let (_temp_dir, mut session) = setup_session();
    let outside = TempDir::new().unwrap();
    let victim = outside.path().join("keep.txt");
    fs::write(&victim, "keep").unwrap();

    let reply = session.run(&format!("rm {}", victim.display())).unwrap();
    assert!(reply.failed);
    assert!(reply.output.contains("operation would escape sandbox"));
    assert_eq!(fs::read_to_string(&victim).unwrap(), "keep");
}

#[cfg(unix)]
#[test]
fn copy_into_directory_does_not_follow_link_out() {
    let (temp_dir, mut session) = setup_session();
    let outside = TempDir::new().unwrap();
    let victim = outside.path().join("victim.txt");
    fs::write(&victim, "keep me").unwrap();

    fs::create_dir(temp_dir.path().join("backup")).unwrap();
    std::os::unix::fs::symlink(&victim, temp_dir.path().join("backup/a.txt")).unwrap();
    session.run("echo replaced > a.txt").unwrap();

    let reply = session.run("cp a.txt backup").unwrap();
    assert!(reply.failed);
    assert_eq!(reply.output, "cp: operation would escape sandbox: backup");
    assert_eq!(fs::read_to_string(&victim).unwrap(), "keep me");
}

#[cfg(unix)]
#[test]
fn echo_into_dangling_link_is_refused() {
    let (temp_dir, mut session) = setup_session();
    let outside = TempDir::new().unwrap();
    let created = outside.path().join("created.txt");
    std::os::unix::fs::symlink(&created, temp_dir.path().join("link")).unwrap();

    let reply = session.run("echo hi > link").unwrap();
    assert_eq!(reply.output, "echo: operation would escape sandbox: link");
    assert!(!created.exists());
}
