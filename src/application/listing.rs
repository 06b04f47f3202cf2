//! Reference pseudocode shown next to the animation.

use crate::domain::TraversalKind;

/// BST operation whose listing can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BstOperation {
    Insert,
    Delete,
}

pub fn traversal_listing(kind: TraversalKind) -> &'static str {
    match kind {
        TraversalKind::Preorder => {
            "void preOrder(BinTree root) {
    if (root != NULL) {
        cout << root->info;
        preOrder(root->left);
        preOrder(root->right);
    }
}"
        }
        TraversalKind::Inorder => {
            "void inOrder(BinTree root) {
    if (root != NULL) {
        inOrder(root->left);
        cout << root->info;
        inOrder(root->right);
    }
}"
        }
        TraversalKind::Postorder => {
            "void postOrder(BinTree root) {
    if (root != NULL) {
        postOrder(root->left);
        postOrder(root->right);
        cout << root->info;
    }
}"
        }
        TraversalKind::LevelOrder => {
            "void levelOrder(BinTree root) {
    if (root == NULL) return;

    queue<address> Q;
    Q.push(root);

    while (!Q.empty()) {
        address n = Q.front();
        Q.pop();
        cout << n->info;

        if (n->left != NULL)
            Q.push(n->left);
        if (n->right != NULL)
            Q.push(n->right);
    }
}"
        }
    }
}

pub fn bst_listing(op: BstOperation) -> &'static str {
    match op {
        BstOperation::Insert => {
            "void insert(BinTree& root, int value) {
    if (root == NULL) {
        root = new Node;
        root->info = value;
        root->left = NULL;
        root->right = NULL;
    }
    else if (value < root->info) {
        insert(root->left, value);
    }
    else if (value > root->info) {
        insert(root->right, value);
    }
}"
        }
        BstOperation::Delete => {
            "void deleteNode(BinTree& root, int value) {
    if (root == NULL) return;

    if (value < root->info) {
        deleteNode(root->left, value);
    }
    else if (value > root->info) {
        deleteNode(root->right, value);
    }
    else {
        if (root->left == NULL) {
            address temp = root->right;
            delete root;
            root = temp;
        }
        else if (root->right == NULL) {
            address temp = root->left;
            delete root;
            root = temp;
        }
        else {
            // successor: minimum of the right subtree
            address temp = root->right;
            while (temp->left != NULL)
                temp = temp->left;
            root->info = temp->info;
            deleteNode(root->right, temp->info);
        }
    }
}"
        }
    }
}
