use std::collections::HashMap;

use time::macros::datetime;

use super::entry::{FolderEntry, FolderId, ParentLink};

/// The demo drive every fresh dashboard starts with.
pub(crate) fn sample_tree() -> (
    HashMap<FolderId, Vec<FolderEntry>>,
    HashMap<FolderId, ParentLink>,
) {
    let mut entries = HashMap::new();
    let mut parents = HashMap::new();

    entries.insert(
        FolderId::root(),
        vec![
            FolderEntry::folder("folder1".into(), "Documents", datetime!(2023-06-15 0:00 UTC)),
            FolderEntry::folder("folder2".into(), "Images", datetime!(2023-07-02 0:00 UTC)),
            FolderEntry::file(
                "file1".into(),
                "Project Report.pdf",
                "2.4 MB",
                datetime!(2023-08-10 0:00 UTC),
            ),
            FolderEntry::file(
                "file2".into(),
                "Presentation.pptx",
                "4.2 MB",
                datetime!(2023-08-12 0:00 UTC),
            ),
        ],
    );
    entries.insert(
        "folder1".into(),
        vec![
            FolderEntry::folder("folder3".into(), "Work", datetime!(2023-07-12 0:00 UTC)),
            FolderEntry::file(
                "file3".into(),
                "Resume.doc",
                "1.2 MB",
                datetime!(2023-08-05 0:00 UTC),
            ),
        ],
    );
    entries.insert(
        "folder2".into(),
        vec![
            FolderEntry::file(
                "file4".into(),
                "Vacation.jpg",
                "3.1 MB",
                datetime!(2023-07-20 0:00 UTC),
            ),
            FolderEntry::file(
                "file5".into(),
                "Profile.png",
                "2.8 MB",
                datetime!(2023-08-08 0:00 UTC),
            ),
        ],
    );
    entries.insert("folder3".into(), Vec::new());

    for (id, name, parent) in [
        ("folder1", "Documents", FolderId::root()),
        ("folder2", "Images", FolderId::root()),
        ("folder3", "Work", FolderId::from("folder1")),
    ] {
        parents.insert(
            FolderId::from(id),
            ParentLink {
                name: name.to_string(),
                parent_id: parent,
            },
        );
    }

    (entries, parents)
}
